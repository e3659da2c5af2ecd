// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Snapbind.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points per millimetre (1 pt = 1/72 in, 1 in = 25.4 mm).
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Default page margin in points, applied on every side.
pub const DEFAULT_MARGIN_PT: f32 = 20.0;

/// Unique identifier for a staged image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An image accepted into the workspace and awaiting export.
///
/// The encoded payload is shared and read-only: cloning a `StagedImage` never
/// copies the bytes, and nothing can mutate them after intake.
#[derive(Clone)]
pub struct StagedImage {
    id: ImageId,
    data: Arc<[u8]>,
    mime_type: String,
    name: String,
    added_at: DateTime<Utc>,
}

impl StagedImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: ImageId::new(),
            data: Arc::from(data),
            mime_type: mime_type.into(),
            name: name.into(),
            added_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    /// The encoded image bytes exactly as they were received.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn byte_size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Same payload under a new id. The bytes stay shared.
    pub(crate) fn with_fresh_id(mut self) -> Self {
        self.id = ImageId::new();
        self
    }

    /// File extension used when exporting the original payload.
    ///
    /// Taken from the MIME subtype (`image/jpeg` -> `jpeg`); falls back to
    /// `png` when the subtype is missing.
    pub fn export_extension(&self) -> &str {
        match self.mime_type.split_once('/') {
            Some((_, subtype)) if !subtype.trim().is_empty() => subtype.trim(),
            _ => "png",
        }
    }
}

impl std::fmt::Debug for StagedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedImage")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("byte_size", &self.data.len())
            .field("added_at", &self.added_at)
            .finish()
    }
}

/// Standard paper sizes (portrait).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm as f32, *height_mm as f32),
        }
    }

    /// Dimensions in PDF points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (w * PT_PER_MM, h * PT_PER_MM)
    }

    /// Parse a paper name as accepted on the command line (`a4`, `letter`,
    /// or `WIDTHxHEIGHT` in millimetres).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(Self::A4),
            "a3" => Some(Self::A3),
            "a5" => Some(Self::A5),
            "letter" => Some(Self::Letter),
            "legal" => Some(Self::Legal),
            other => {
                let (w, h) = other.split_once('x')?;
                let width_mm = w.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
                let height_mm = h.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
                Some(Self::Custom {
                    width_mm,
                    height_mm,
                })
            }
        }
    }
}

/// Page dimensions and margin, all in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn for_paper(paper: PaperSize, margin: f32) -> Self {
        let (width, height) = paper.dimensions_pt();
        Self::new(width, height, margin)
    }

    pub fn printable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn printable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::for_paper(PaperSize::A4, DEFAULT_MARGIN_PT)
    }
}

/// Where an image lands on its page. Origin is the top-left corner; all
/// values are in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}
