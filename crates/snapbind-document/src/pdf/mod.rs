// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — composing staged images into pages and inspecting the result.

pub mod composer;
pub mod inspect;

pub use composer::{ComposedDocument, DocumentComposer};
