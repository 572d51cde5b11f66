use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use takeout_config::Config;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "takeout", version, about = "Audit and enrich extracted Google Takeout exports")]
pub struct Cli {
    /// Extra config file (TOML, YAML or JSON), layered over the user config.
    #[arg(short, long, global = true, env = "TAKEOUT_CONFIG")]
    pub config: Option<PathBuf>,
    /// More logging; repeat for more detail.
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}
impl Cli {
    pub fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy sidecar metadata into the media files under a directory.
    Embed(EmbedArgs),
    /// Check an extracted export against its navigator page.
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct EmbedArgs {
    /// Root of the extracted media tree.
    pub root: PathBuf,
    /// ExifTool executable (path, or name on PATH).
    #[arg(short, long)]
    pub exiftool: Option<PathBuf>,
    /// Move consumed sidecars here, keeping their relative paths.
    #[arg(short, long = "metadata-dir", visible_alias = "metadata")]
    pub metadata_dir: Option<PathBuf>,
    /// Maximum sidecar name length the export was produced with.
    #[arg(long)]
    pub truncation_limit: Option<usize>,
    /// Files processed at once (0 = one per CPU).
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
    /// Pair and parse sidecars without writing or moving anything.
    #[arg(long)]
    pub dry_run: bool,
}
impl EmbedArgs {
    /// Flags override whatever the config layers produced.
    pub fn apply(&self, config: &mut Config) {
        if let Some(exiftool) = &self.exiftool {
            config.exiftool = Some(exiftool.clone());
        }
        if let Some(metadata_dir) = &self.metadata_dir {
            config.metadata_dir = Some(metadata_dir.clone());
        }
        if let Some(limit) = self.truncation_limit {
            config.truncation_limit = limit;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
    }
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// The navigator HTML page shipped with the export.
    pub navigator: PathBuf,
    /// Directory the archives were extracted into; defaults to the page's
    /// own directory.
    #[arg(long)]
    pub root: Option<PathBuf>,
}
impl VerifyArgs {
    pub fn root(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.clone(),
            None => match self.navigator.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }
}
