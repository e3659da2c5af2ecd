// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Archive export — the original staged payloads bundled into a ZIP.
//
// Payloads are stored exactly as received. Nothing is decoded or re-encoded,
// so an undecodable image still exports here even though the composer would
// reject it.

use std::io::{Cursor, Write};

use snapbind_core::CancelFlag;
use snapbind_core::error::{Result, SnapbindError};
use snapbind_core::types::StagedImage;
use tracing::{debug, info, instrument, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive member name for the image at zero-based `index`:
/// `image-1.png`, `image-2.jpeg`, ...
pub fn entry_name(index: usize, image: &StagedImage) -> String {
    format!("image-{}.{}", index + 1, image.export_extension())
}

/// Build a deflate-compressed ZIP holding every image in order.
pub fn build_archive(images: &[StagedImage]) -> Result<Vec<u8>> {
    build_archive_with_cancel(images, &CancelFlag::new())
}

/// Like [`build_archive`], checking `cancel` before each entry.
#[instrument(skip_all, fields(images = images.len()))]
pub fn build_archive_with_cancel(images: &[StagedImage], cancel: &CancelFlag) -> Result<Vec<u8>> {
    if images.is_empty() {
        return Err(SnapbindError::NothingToExport);
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (index, image) in images.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!(index, "Archive cancelled");
            return Err(SnapbindError::Cancelled);
        }
        let name = entry_name(index, image);
        writer
            .start_file(name.as_str(), options)
            .map_err(|err| SnapbindError::export(format!("cannot add {name}: {err}")))?;
        writer
            .write_all(image.data())
            .map_err(|err| SnapbindError::export(format!("cannot write {name}: {err}")))?;
        debug!(%name, bytes = image.byte_size(), "Archive entry written");
    }

    let bytes = writer
        .finish()
        .map_err(|err| SnapbindError::export(format!("cannot finish archive: {err}")))?
        .into_inner();

    info!(entries = images.len(), bytes = bytes.len(), "Archive built");
    Ok(bytes)
}
