// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Read-back checks on a written PDF using `lopdf`.

use lopdf::Document;
use snapbind_core::error::{Result, SnapbindError};
use tracing::{debug, instrument};

/// Count the pages of a PDF held in memory.
#[instrument(skip_all, fields(bytes_len = data.len()))]
pub fn page_count(data: &[u8]) -> Result<usize> {
    let document = Document::load_mem(data)
        .map_err(|err| SnapbindError::export(format!("PDF could not be read back: {err}")))?;
    let pages = document.get_pages().len();
    debug!(pages, "PDF inspected");
    Ok(pages)
}
