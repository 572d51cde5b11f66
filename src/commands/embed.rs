use std::sync::Arc;

use exn::ResultExt;
use takeout_config::Config;
use takeout_embed::{Context, Mode, Report};
use takeout_exiftool::Exiftool;

use crate::cli::EmbedArgs;
use crate::commands::Status;
use crate::error::{ErrorKind, Result};

pub async fn embed(args: EmbedArgs, mut config: Config) -> Result<Status> {
    args.apply(&mut config);
    config.validate().or_raise(|| ErrorKind::Config)?;

    let mode = if args.dry_run {
        Mode::DryRun
    } else {
        let exiftool = Exiftool::discover(config.exiftool.as_deref()).or_raise(|| ErrorKind::Exiftool)?;
        match exiftool.version().await {
            Ok(version) => tracing::info!(path = %exiftool.path().display(), %version, "Using exiftool"),
            Err(err) => tracing::warn!(path = %exiftool.path().display(), error = ?err, "Could not query exiftool version"),
        }
        Mode::Apply(Arc::new(exiftool))
    };

    let mut ctx = Context::new(args.root, mode);
    ctx.resolver = config.resolver().or_raise(|| ErrorKind::Config)?;
    ctx.filter = config.filter();
    ctx.metadata_dir = config.metadata_dir.clone();
    ctx.concurrency = config.effective_concurrency().get();

    let report = takeout_embed::run(&ctx).await.or_raise(|| ErrorKind::Embed)?;
    print_report(&report, ctx.mode.is_dry_run());
    Ok(status(&report))
}

fn status(report: &Report) -> Status {
    if report.is_success() { Status::Success } else { Status::Partial }
}

fn print_report(report: &Report, dry_run: bool) {
    for (directory, counts) in report.directories() {
        let directory = if directory.as_os_str().is_empty() { ".".to_string() } else { directory.display().to_string() };
        println!("{directory}: {counts}");
    }
    for directory in report.unreadable() {
        println!("{}: unreadable, not processed", directory.display());
    }
    let totals = report.totals();
    let prefix = if dry_run { "Total (dry run)" } else { "Total" };
    println!("{prefix}: {totals}");
}
