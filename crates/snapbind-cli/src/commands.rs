// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command implementations.
//
// Staging happens up front on the async thread. Composition and archiving
// are CPU-bound and run on the blocking pool. Ctrl-C trips a cancel flag
// that both check between images, and every command checks it again before
// writing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use snapbind_core::{AppConfig, CancelFlag, Workspace};
use snapbind_document::pdf::inspect;
use snapbind_document::{
    ComposedDocument, DocumentComposer, IntakeReport, build_archive_with_cancel, intake,
};
use tracing::{info, warn};

/// Name given to an image read from stdin.
const PASTED_NAME: &str = "pasted-image";

/// Stage every input into a fresh workspace. `-` reads one image from stdin.
pub fn stage(inputs: &[PathBuf]) -> Result<Workspace> {
    let mut workspace = Workspace::new();
    let mut report = IntakeReport::default();

    for input in inputs {
        if input.as_os_str() == "-" {
            let stdin = std::io::stdin().lock();
            match intake::stage_reader(PASTED_NAME, stdin)? {
                Some(image) => report.accepted.push(workspace.add(image)),
                None => report.rejected.push(PASTED_NAME.into()),
            }
            continue;
        }
        let part = intake::stage_all(&mut workspace, std::slice::from_ref(input))
            .with_context(|| format!("reading {}", input.display()))?;
        report.accepted.extend(part.accepted);
        report.rejected.extend(part.rejected);
    }

    if !report.rejected.is_empty() {
        info!(skipped = ?report.rejected, "Skipped inputs that are not images");
    }
    info!(
        images = workspace.len(),
        bytes = workspace.total_bytes(),
        "Workspace staged"
    );
    Ok(workspace)
}

/// Install the process-wide Ctrl-C handler.
///
/// The first interrupt trips the returned flag; compositions and archives
/// stop at the next image and nothing is written. A second interrupt exits
/// immediately.
pub fn cancel_on_interrupt() -> CancelFlag {
    let flag = CancelFlag::new();
    let handle = flag.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Interrupt received, cancelling after the current image");
        handle.cancel();
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Second interrupt, exiting");
            std::process::exit(130);
        }
    });
    flag
}

async fn compose(
    config: &AppConfig,
    workspace: Arc<Workspace>,
    cancel: &CancelFlag,
) -> Result<ComposedDocument> {
    let composer = DocumentComposer::from_config(config);
    let cancel = cancel.clone();
    let doc = tokio::task::spawn_blocking(move || {
        composer.compose_with_cancel(workspace.images(), &cancel)
    })
    .await
    .context("composition task panicked")??;
    Ok(doc)
}

async fn archive(workspace: Arc<Workspace>, cancel: &CancelFlag) -> Result<Vec<u8>> {
    let cancel = cancel.clone();
    let bytes =
        tokio::task::spawn_blocking(move || build_archive_with_cancel(workspace.images(), &cancel))
            .await
            .context("archive task panicked")??;
    Ok(bytes)
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

async fn write_pdf(doc: &ComposedDocument, path: &Path) -> Result<()> {
    write_file(path, doc.to_bytes()).await?;
    let pages = inspect::page_count(doc.to_bytes())?;
    println!("Wrote {} ({pages} pages, {} bytes)", path.display(), doc.to_bytes().len());
    Ok(())
}

async fn write_archive(bytes: &[u8], entries: usize, path: &Path) -> Result<()> {
    write_file(path, bytes).await?;
    println!("Wrote {} ({entries} images, {} bytes)", path.display(), bytes.len());
    Ok(())
}

async fn write_base64(text: &str, path: &Path) -> Result<()> {
    write_file(path, text.as_bytes()).await?;
    println!("Wrote {} ({} characters)", path.display(), text.len());
    Ok(())
}

pub async fn pdf(
    config: &AppConfig,
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    cancel: &CancelFlag,
) -> Result<()> {
    let workspace = Arc::new(stage(inputs)?);
    let doc = compose(config, workspace, cancel).await?;
    cancel.check()?;
    let path = output.unwrap_or_else(|| PathBuf::from(&config.pdf_file_name));
    write_pdf(&doc, &path).await
}

pub async fn zip(
    config: &AppConfig,
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    cancel: &CancelFlag,
) -> Result<()> {
    let workspace = Arc::new(stage(inputs)?);
    let entries = workspace.len();
    let bytes = archive(workspace, cancel).await?;
    cancel.check()?;
    let path = output.unwrap_or_else(|| PathBuf::from(&config.archive_file_name));
    write_archive(&bytes, entries, &path).await
}

pub async fn base64(
    config: &AppConfig,
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    cancel: &CancelFlag,
) -> Result<()> {
    let workspace = Arc::new(stage(inputs)?);
    let text = compose(config, workspace, cancel).await?.to_base64();
    cancel.check()?;
    match output {
        Some(path) => write_base64(&text, &path).await?,
        None => println!("{text}"),
    }
    Ok(())
}

pub async fn preview(config: &AppConfig, inputs: &[PathBuf], cancel: &CancelFlag) -> Result<()> {
    let workspace = Arc::new(stage(inputs)?);
    let doc = compose(config, workspace, cancel).await?;
    print!("{}", render_preview(&doc));
    Ok(())
}

/// Compose and archive concurrently, then write all three outputs.
///
/// Nothing touches the disk until both sides have succeeded, so a failure or
/// a cancellation on either side leaves the output directory untouched.
pub async fn export(
    config: &AppConfig,
    inputs: &[PathBuf],
    out_dir: PathBuf,
    cancel: &CancelFlag,
) -> Result<()> {
    let workspace = Arc::new(stage(inputs)?);
    let entries = workspace.len();

    let (doc, archive_bytes) = tokio::try_join!(
        compose(config, Arc::clone(&workspace), cancel),
        archive(Arc::clone(&workspace), cancel)
    )?;
    cancel.check()?;

    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("creating {}", out_dir.display()))?;
    write_pdf(&doc, &out_dir.join(&config.pdf_file_name)).await?;
    write_base64(&doc.to_base64(), &out_dir.join(&config.base64_file_name)).await?;
    write_archive(&archive_bytes, entries, &out_dir.join(&config.archive_file_name)).await?;

    info!(dir = %out_dir.display(), "Export complete");
    Ok(())
}

pub fn settings(config: &AppConfig) -> Result<()> {
    print!("{}", render_settings(config)?);
    Ok(())
}

/// Effective settings as JSON, followed by the resulting text tone.
fn render_settings(config: &AppConfig) -> Result<String> {
    let tone = if config.appearance.prefers_light_text()? {
        "light"
    } else {
        "dark"
    };
    Ok(format!(
        "{}\ntext tone: {tone} on {:?} {}\n",
        serde_json::to_string_pretty(config)?,
        config.appearance.theme,
        config.appearance.background
    ))
}

/// Text table of the page layout, one row per page.
fn render_preview(doc: &ComposedDocument) -> String {
    let page = doc.geometry();
    let mut out = format!(
        "page {:.2} x {:.2} pt, margin {:.2} pt\n{:>4}  {:<28} {:>11}  {:>8} {:>8} {:>8} {:>8}\n",
        page.width, page.height, page.margin, "#", "image", "pixels", "x", "y", "width", "height"
    );
    for p in doc.preview() {
        let pixels = format!("{}x{}", p.pixel_width, p.pixel_height);
        out.push_str(&format!(
            "{:>4}  {:<28} {:>11}  {:>8.2} {:>8.2} {:>8.2} {:>8.2}\n",
            p.index + 1,
            p.name,
            pixels,
            p.placement.x,
            p.placement.y,
            p.placement.width,
            p.placement.height
        ));
    }
    out
}
