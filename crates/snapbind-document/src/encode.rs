// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text export — standard, padded base64.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use snapbind_core::error::{Result, SnapbindError};

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64 text. Surrounding whitespace and line breaks are ignored so
/// that text copied out of a wrapped view still decodes.
pub fn from_base64(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|err| SnapbindError::export(format!("invalid base64 text: {err}")))
}
