// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background themes and the text-contrast decision.
//
// Contrast is decided from WCAG relative luminance of the background colour.

use serde::{Deserialize, Serialize};

/// Luminance below which white text contrasts better than black.
///
/// At L = sqrt(1.05 * 0.05) - 0.05 the contrast ratios against white and
/// black are equal.
pub const DARK_LUMINANCE_THRESHOLD: f64 = 0.179;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    /// Solid user-chosen background colour.
    #[default]
    Plain,
    Midnight,
    Sunrise,
    Forest,
    Town,
}

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                let expand = |i: usize| -> Option<u8> {
                    let nibble = u8::from_str_radix(&hex[i..i + 1], 16).ok()?;
                    Some(nibble * 17)
                };
                Some(Self {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            _ => None,
        }
    }

    /// WCAG 2.x relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(&self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    pub fn is_dark(&self) -> bool {
        self.relative_luminance() < DARK_LUMINANCE_THRESHOLD
    }
}

/// Whether text drawn over this theme should be light.
///
/// Midnight and Town are night scenes and always take light text. The plain
/// theme decides from the background colour's luminance.
pub fn prefers_light_text(theme: Theme, background: Rgb) -> bool {
    match theme {
        Theme::Midnight | Theme::Town => true,
        Theme::Sunrise | Theme::Forest => false,
        Theme::Plain => background.is_dark(),
    }
}
