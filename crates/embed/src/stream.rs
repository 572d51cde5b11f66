use std::path::PathBuf;
use std::pin::pin;

use async_stream::stream;
use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};

use crate::{Context, Mode};
use crate::error::Result;
use crate::file::{FileResult, process};
use crate::plan::plan;
use crate::report::{Outcome, Report};
use crate::snapshot::Snapshot;

/// Progress events emitted by [`embed`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started), exactly once.
/// 2. [`DiscoveryComplete`](Self::DiscoveryComplete), exactly once, once
///    every media file has been paired.
/// 3. [`Processed`](Self::Processed), once per media file, in completion
///    order.
/// 4. [`Complete`](Self::Complete), exactly once.
///
/// Only a failure to read the root terminates the stream early, in which case
/// the single `Err` item replaces everything after `Started`.
#[derive(Debug)]
pub enum EmbedEvent {
    Started,
    DiscoveryComplete {
        /// Number of media files about to be processed.
        media: u64,
        /// Directories that could not be listed.
        unreadable: Vec<PathBuf>,
    },
    Processed(FileResult),
    Complete,
}

/// Streams an [`EmbedEvent`] for every media file under `ctx.root`.
///
/// At most `ctx.concurrency` files are in flight at once; another is
/// promoted each time one completes. Per-file failures are carried inside
/// [`FileResult`] and never end the stream.
pub fn embed(ctx: &Context) -> impl Stream<Item = Result<EmbedEvent>> + '_ {
    // `rustfmt` does not format macros that use braces. Wrap in parentheses!
    stream!({
        yield Ok(EmbedEvent::Started);
        match &ctx.mode {
            Mode::Apply(writer) => tracing::info!(root = %ctx.root.display(), writer = writer.name(), "Embedding metadata"),
            Mode::DryRun => tracing::info!(root = %ctx.root.display(), "Dry run, nothing will be written"),
        }

        let snapshot = match Snapshot::capture(&ctx.root, &ctx.filter).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                yield Err(e);
                return;
            },
        };
        let jobs = plan(&snapshot, &ctx.resolver);
        tracing::info!(
            directories = snapshot.directories().count(),
            media = jobs.len(),
            resolved = jobs.iter().filter(|job| job.pairing.is_resolved()).count(),
            "Discovery complete"
        );
        yield Ok(EmbedEvent::DiscoveryComplete {
            media: u64::try_from(jobs.len()).unwrap_or(u64::MAX),
            unreadable: snapshot.unreadable().to_vec(),
        });

        let mut pending = jobs.into_iter();
        let mut processing = FuturesUnordered::new();
        processing.extend(pending.by_ref().take(ctx.concurrency.max(1)).map(|job| process(ctx, job)));
        while let Some(result) = processing.next().await {
            yield Ok(EmbedEvent::Processed(result));
            if let Some(job) = pending.next() {
                processing.push(process(ctx, job));
            }
        }

        yield Ok(EmbedEvent::Complete);
    })
}

/// Drives [`embed`] to completion, logging each file and tallying a [`Report`].
///
/// # Errors
/// Only if the root could not be read.
pub async fn run(ctx: &Context) -> Result<Report> {
    let mut report = Report::default();
    let mut events = pin!(embed(ctx));
    while let Some(event) = events.next().await {
        match event? {
            EmbedEvent::DiscoveryComplete { unreadable, .. } => report.record_unreadable(&unreadable),
            EmbedEvent::Processed(result) => {
                log_result(&result);
                report.record(&result);
            },
            EmbedEvent::Started | EmbedEvent::Complete => {},
        }
    }
    Ok(report)
}

fn log_result(result: &FileResult) {
    let media = result.job.media_path();
    match (&result.result, Outcome::of(result)) {
        (Ok(applied), _) => tracing::info!(
            media = %media.display(),
            sidecar = %applied.sidecar,
            written = applied.written,
            relocated = ?applied.relocated,
            "Applied metadata"
        ),
        (Err(err), outcome) if outcome.is_failure() => {
            tracing::error!(media = %media.display(), error = ?err, "Failed to apply metadata");
        },
        (Err(err), _) => tracing::warn!(media = %media.display(), reason = %&**err, "Skipped"),
    }
}
