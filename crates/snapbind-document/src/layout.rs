// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fit-to-page layout: scale an image to the largest size that fits inside
// the printable area without distortion, then centre it on the page.

use snapbind_core::types::{PageGeometry, Placement};

/// Compute where an image of `width` x `height` pixels lands on `page`.
///
/// The image first takes the full printable width. If that makes it taller
/// than the printable height, height becomes the binding axis instead. The
/// aspect ratio is preserved exactly and the result is centred on the full
/// page, so with equal margins it is also centred within the printable area.
///
/// Returns `None` for an image with no pixels or a page with no printable
/// area.
pub fn fit_to_page(width: u32, height: u32, page: &PageGeometry) -> Option<Placement> {
    let printable_w = page.printable_width();
    let printable_h = page.printable_height();
    if width == 0 || height == 0 || !(printable_w > 0.0 && printable_h > 0.0) {
        return None;
    }

    let ratio = width as f32 / height as f32;

    let mut target_w = printable_w;
    let mut target_h = target_w / ratio;
    if target_h > printable_h {
        target_h = printable_h;
        target_w = target_h * ratio;
    }

    Some(Placement {
        x: (page.width - target_w) / 2.0,
        y: (page.height - target_h) / 2.0,
        width: target_w,
        height: target_h,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn page() -> PageGeometry {
        PageGeometry::new(595.0, 840.0, 20.0)
    }

    fn fit(width: u32, height: u32, page: &PageGeometry) -> Placement {
        fit_to_page(width, height, page).unwrap()
    }

    #[test]
    fn wide_image_takes_printable_width() {
        let p = fit(400, 200, &page());
        assert!((p.width - 555.0).abs() < EPS);
        assert!((p.height - 277.5).abs() < EPS);
        assert!((p.x - 20.0).abs() < EPS);
        assert!((p.y - 281.25).abs() < EPS);
    }

    #[test]
    fn y_equals_margin_plus_half_the_slack() {
        let g = page();
        let p = fit(400, 200, &g);
        let expected = g.margin + (g.printable_height() - p.height) / 2.0;
        assert!((p.y - expected).abs() < EPS);
    }

    #[test]
    fn tall_image_is_height_bound() {
        let g = page();
        let p = fit(100, 400, &g);
        assert!((p.height - 800.0).abs() < EPS);
        assert!((p.width - 200.0).abs() < EPS);
        assert!((p.y - 20.0).abs() < EPS);
        assert!((p.x - 197.5).abs() < EPS);
    }

    #[test]
    fn square_image_on_portrait_page_is_width_bound() {
        let p = fit(512, 512, &page());
        assert!((p.width - 555.0).abs() < EPS);
        assert!((p.height - 555.0).abs() < EPS);
    }

    #[test]
    fn wide_page_switches_to_height_bound_for_square() {
        let landscape = PageGeometry::new(840.0, 595.0, 20.0);
        let p = fit(300, 300, &landscape);
        assert!((p.height - 555.0).abs() < EPS);
        assert!((p.width - 555.0).abs() < EPS);
        assert!((p.x - 142.5).abs() < EPS);
    }

    #[test]
    fn aspect_ratio_is_preserved() {
        let g = PageGeometry::default();
        for (w, h) in [(1, 1), (1920, 1080), (1080, 1920), (3, 7000), (7000, 3), (641, 479)] {
            let p = fit(w, h, &g);
            let original = w as f64 / h as f64;
            let placed = p.width as f64 / p.height as f64;
            assert!(
                (placed - original).abs() / original < 1e-4,
                "{w}x{h}: placed ratio {placed} vs {original}"
            );
        }
    }

    #[test]
    fn placement_stays_inside_printable_area() {
        let g = PageGeometry::default();
        for (w, h) in [(1, 1), (1920, 1080), (1080, 1920), (3, 7000), (7000, 3)] {
            let p = fit(w, h, &g);
            assert!(p.width <= g.printable_width() + EPS);
            assert!(p.height <= g.printable_height() + EPS);
            assert!(p.x >= g.margin - EPS);
            assert!(p.y >= g.margin - EPS);
        }
    }

    #[test]
    fn zero_sized_image_has_no_placement() {
        assert!(fit_to_page(0, 200, &page()).is_none());
        assert!(fit_to_page(400, 0, &page()).is_none());
    }

    #[test]
    fn page_without_printable_area_has_no_placement() {
        let cramped = PageGeometry::new(100.0, 100.0, 50.0);
        assert!(fit_to_page(10, 10, &cramped).is_none());
    }
}
