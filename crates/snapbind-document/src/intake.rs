// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Intake — turn files, streams, and raw bytes into staged images.
//
// Only images are accepted. Anything else is dropped quietly (debug log),
// the same way a file picker filtered to images would ignore it.

use std::io::Read;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use snapbind_core::Workspace;
use snapbind_core::error::Result;
use snapbind_core::types::{ImageId, StagedImage};
use tracing::{debug, info, instrument};

/// Outcome of staging a batch of inputs.
#[derive(Debug, Clone, Default)]
pub struct IntakeReport {
    /// Ids of the images added to the workspace, in order.
    pub accepted: Vec<ImageId>,
    /// Names of inputs skipped because they are not images.
    pub rejected: Vec<String>,
}

/// Decide the MIME type of a candidate payload, or `None` if it is not an
/// image.
///
/// A declared type wins when present: `image/*` is accepted as-is and
/// anything else is rejected. Without one, the payload's magic bytes are
/// checked first and the file extension second.
pub fn detect_mime(name: &str, declared: Option<&str>, bytes: &[u8]) -> Option<String> {
    if let Some(declared) = declared {
        let declared = declared.trim().to_ascii_lowercase();
        return declared.starts_with("image/").then_some(declared);
    }

    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type().to_string());
    }

    let ext = Path::new(name).extension()?.to_str()?;
    ImageFormat::from_extension(ext).map(|format| format.to_mime_type().to_string())
}

/// Stage an in-memory payload. Returns `None` when it is not an image.
pub fn stage_bytes(name: &str, declared: Option<&str>, bytes: Vec<u8>) -> Option<StagedImage> {
    match detect_mime(name, declared, &bytes) {
        Some(mime) => Some(StagedImage::new(name, mime, bytes)),
        None => {
            debug!(name, ?declared, "Rejected non-image input");
            None
        }
    }
}

/// Read and stage a single file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn stage_path(path: impl AsRef<Path>) -> Result<Option<StagedImage>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(stage_bytes(&name, None, bytes))
}

/// Drain a stream (e.g. stdin carrying a pasted image) and stage it.
pub fn stage_reader(name: &str, mut reader: impl Read) -> Result<Option<StagedImage>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(stage_bytes(name, None, bytes))
}

/// Stage every input path into `workspace`, in the order given.
///
/// A directory contributes its regular files (one level deep) sorted by file
/// name. Read errors abort the batch; non-images are only reported.
#[instrument(skip_all, fields(inputs = inputs.len()))]
pub fn stage_all(workspace: &mut Workspace, inputs: &[PathBuf]) -> Result<IntakeReport> {
    let mut report = IntakeReport::default();

    for input in inputs {
        for path in expand(input)? {
            match stage_path(&path)? {
                Some(image) => report.accepted.push(workspace.add(image)),
                None => report.rejected.push(path.display().to_string()),
            }
        }
    }

    info!(
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        staged = workspace.len(),
        "Intake complete"
    );
    Ok(report)
}

fn expand(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
