// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Snapbind.

use thiserror::Error;

/// Top-level error type for all Snapbind operations.
#[derive(Debug, Error)]
pub enum SnapbindError {
    // -- Composition errors --
    /// A staged image could not be interpreted as an image.
    #[error("failed to decode image '{name}': {detail}")]
    Decode { name: String, detail: String },

    #[error("nothing to export: no images are staged")]
    NothingToExport,

    #[error("composition cancelled")]
    Cancelled,

    // -- Export errors --
    #[error("export failed: {0}")]
    Export(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SnapbindError {
    pub fn decode(name: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::Decode {
            name: name.into(),
            detail: detail.to_string(),
        }
    }

    pub fn export(detail: impl std::fmt::Display) -> Self {
        Self::Export(detail.to_string())
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SnapbindError>;
