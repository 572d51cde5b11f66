use std::path::{Path, PathBuf};

use exn::ResultExt;
use takeout_sidecar::{MetadataFields, Pairing};
use tokio::fs;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::plan::Job;
use crate::relocate::relocate;
use crate::{Context, Mode};

/// What was done for a successfully processed media file.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// Name of the sidecar the fields were read from.
    pub sidecar: String,
    pub fields: MetadataFields,
    /// `false` in dry-run mode, or when the sidecar had nothing to write.
    pub written: bool,
    /// Where the sidecar was moved to, if it was.
    pub relocated: Option<PathBuf>,
}

/// The outcome of processing one [`Job`].
#[derive(Debug)]
pub struct FileResult {
    pub job: Job,
    pub result: Result<Applied>,
}

pub(crate) async fn process(ctx: &Context, job: Job) -> FileResult {
    let result = apply(ctx, &job).await;
    FileResult { job, result }
}

#[instrument(level = "debug", skip(ctx, job), fields(media = %job.media_path().display()))]
async fn apply(ctx: &Context, job: &Job) -> Result<Applied> {
    let directory = ctx.root.join(&job.directory);
    let (sidecar, fields) = match &job.pairing {
        Pairing::NotFound => exn::bail!(ErrorKind::NoSidecar),
        Pairing::Ambiguous(candidates) => match by_title(&directory, job.media.name(), candidates).await {
            Some(found) => found,
            None => exn::bail!(ErrorKind::AmbiguousSidecar(candidates.clone())),
        },
        Pairing::Exact(sidecar) | Pairing::Legacy(sidecar) | Pairing::Truncated { sidecar, .. } => {
            let bytes = fs::read(directory.join(sidecar)).await.or_raise(|| ErrorKind::ReadSidecar)?;
            let fields = MetadataFields::from_slice(&bytes).or_raise(|| ErrorKind::MalformedSidecar)?;
            (sidecar.clone(), fields)
        },
    };
    let sidecar_path = directory.join(&sidecar);

    let writer = match &ctx.mode {
        Mode::Apply(writer) => writer,
        Mode::DryRun => {
            return Ok(Applied { sidecar, fields, written: false, relocated: None });
        },
    };
    let written = !fields.is_empty();
    if written {
        let media_path = directory.join(job.media.name());
        writer.write(&media_path, &fields).await.map_err(|err| {
            let diagnostic = (*err).to_string();
            err.raise(ErrorKind::ExternalTool(diagnostic))
        })?;
    }

    let relocated = match &ctx.metadata_dir {
        Some(metadata_dir) => {
            let target = metadata_dir.join(&job.directory).join(&sidecar);
            relocate(&sidecar_path, &target).await.or_raise(|| ErrorKind::Relocate(target.clone()))?;
            Some(target)
        },
        None => None,
    };

    Ok(Applied { sidecar, fields, written, relocated })
}

/// Settles an ambiguous pairing with the file name Google Photos recorded in
/// each candidate's `title`. Only a single match counts; unreadable or
/// malformed candidates never match.
async fn by_title(directory: &Path, media: &str, candidates: &[String]) -> Option<(String, MetadataFields)> {
    let mut matches = Vec::new();
    for candidate in candidates {
        let Ok(bytes) = fs::read(directory.join(candidate)).await else { continue };
        if let Ok(fields) = MetadataFields::from_slice(&bytes)
            && fields.title.as_deref() == Some(media)
        {
            matches.push((candidate.clone(), fields));
        }
    }
    if matches.len() != 1 {
        return None;
    }
    let found = matches.pop();
    if let Some((sidecar, _)) = &found {
        tracing::debug!(media, sidecar = %sidecar, "Ambiguous sidecar settled by title");
    }
    found
}
