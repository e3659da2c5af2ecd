// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error notices.
//
// Every failure of a user-triggered action ends up here so it can be shown
// to the user instead of only being logged.

use crate::error::SnapbindError;

/// How the front end should present a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing went wrong; the user asked for something that has no effect.
    Info,
    /// The user can fix it (remove a bad file, stage an image).
    ActionRequired,
    /// The export itself failed.
    Failure,
}

/// A plain-language error with a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short summary (shown as a heading).
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
    pub severity: Severity,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.message, self.suggestion)
    }
}

/// Convert a `SnapbindError` into a `Notice` for display.
pub fn humanize_error(err: &SnapbindError) -> Notice {
    match err {
        SnapbindError::Decode { name, .. } => Notice {
            message: format!("\"{name}\" could not be read as an image."),
            suggestion: "Remove it from the list, or save it again as PNG or JPEG, then export again."
                .into(),
            severity: Severity::ActionRequired,
        },

        SnapbindError::NothingToExport => Notice {
            message: "There is nothing to export yet.".into(),
            suggestion: "Add at least one image first.".into(),
            severity: Severity::Info,
        },

        SnapbindError::Cancelled => Notice {
            message: "Export cancelled.".into(),
            suggestion: "No file was written. Start the export again when ready.".into(),
            severity: Severity::Info,
        },

        SnapbindError::Export(detail) => Notice {
            message: "The export could not be completed.".into(),
            suggestion: format!(
                "Try exporting fewer or smaller images at a time. ({detail})"
            ),
            severity: Severity::Failure,
        },

        SnapbindError::Config(detail) => Notice {
            message: "The settings are not usable.".into(),
            suggestion: format!("Check the paper size and margin. ({detail})"),
            severity: Severity::ActionRequired,
        },

        SnapbindError::Io(io) => Notice {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check that the path exists and is writable. ({io})"),
            severity: Severity::Failure,
        },

        SnapbindError::Serialization(detail) => Notice {
            message: "The settings file is not valid JSON.".into(),
            suggestion: format!("Fix or remove the settings file. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}
