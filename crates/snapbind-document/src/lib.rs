// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// snapbind-document — Everything between a staged image and an exported file.
//
// Provides intake (MIME filtering of files, streams, and raw bytes), the
// fit-to-page layout, the PDF composer, and the two derived exports: a ZIP
// archive of the original payloads and a base64 rendering of the PDF.

pub mod archive;
pub mod encode;
pub mod intake;
pub mod layout;
pub mod pdf;

// Re-export the primary entry points so callers can use
// `snapbind_document::DocumentComposer` etc.
pub use archive::{build_archive, build_archive_with_cancel};
pub use intake::IntakeReport;
pub use layout::fit_to_page;
pub use pdf::composer::{ComposedDocument, DocumentComposer, PagePreview};
