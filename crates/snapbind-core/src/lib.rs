// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Snapbind — Core types, error definitions, and in-memory workspace state
// shared across all crates.

pub mod cancel;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod theme;
pub mod types;
pub mod workspace;

pub use cancel::CancelFlag;
pub use config::AppConfig;
pub use error::SnapbindError;
pub use types::*;
pub use workspace::Workspace;
