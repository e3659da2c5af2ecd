// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document composer — one page per staged image, scaled to fit and centred,
// built with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: each page is a `PdfPage` holding a
// `Vec<Op>`, and images are registered once as XObjects and referenced from
// the page ops. The whole document is serialised with `PdfDocument::save()`.

use std::path::Path;

use image::{DynamicImage, RgbImage};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use snapbind_core::error::{Result, SnapbindError};
use snapbind_core::types::{ImageId, PT_PER_MM, PageGeometry, Placement, StagedImage};
use snapbind_core::{AppConfig, CancelFlag};
use tracing::{debug, info, instrument, warn};

use crate::encode;
use crate::layout::fit_to_page;

/// At 72 DPI one image pixel is one PDF point, so the XObject scale factor
/// is simply target size over pixel size.
const PLACEMENT_DPI: f32 = 72.0;

/// Turns an ordered list of staged images into a paginated PDF.
pub struct DocumentComposer {
    /// Page size and margin shared by every page.
    page: PageGeometry,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

/// Layout of one composed page, as shown in a preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePreview {
    /// Zero-based page index (equals the image's position in the input).
    pub index: usize,
    pub image_id: ImageId,
    pub name: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub placement: Placement,
}

/// The result of a composition.
///
/// The PDF bytes, the per-page preview, and the base64 text are three views
/// of the same composition; none of them re-runs layout.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    bytes: Vec<u8>,
    pages: Vec<PagePreview>,
    geometry: PageGeometry,
}

impl DocumentComposer {
    /// Create a composer for the given page geometry.
    pub fn new(page: PageGeometry) -> Self {
        Self {
            page,
            title: "Snapbind".into(),
        }
    }

    /// Create a composer from the session settings.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut composer = Self::new(config.page_geometry());
        composer.set_title(config.document_title.clone());
        composer
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Compose `images` into a PDF, one page per image, in order.
    ///
    /// Fails with `NothingToExport` for an empty list and with `Decode` on the
    /// first image that cannot be decoded; no partial document is returned.
    pub fn compose(&self, images: &[StagedImage]) -> Result<ComposedDocument> {
        self.compose_with_cancel(images, &CancelFlag::new())
    }

    /// Like [`DocumentComposer::compose`], checking `cancel` before each image.
    #[instrument(skip_all, fields(images = images.len()))]
    pub fn compose_with_cancel(
        &self,
        images: &[StagedImage],
        cancel: &CancelFlag,
    ) -> Result<ComposedDocument> {
        self.compose_pages(images, cancel, |_| {})
    }

    /// The composition loop. `on_page` sees each page once it is laid out.
    fn compose_pages(
        &self,
        images: &[StagedImage],
        cancel: &CancelFlag,
        mut on_page: impl FnMut(&PagePreview),
    ) -> Result<ComposedDocument> {
        if images.is_empty() {
            return Err(SnapbindError::NothingToExport);
        }

        info!(
            page_w = self.page.width,
            page_h = self.page.height,
            margin = self.page.margin,
            title = %self.title,
            "Composing PDF"
        );

        let page_w = Mm(self.page.width / PT_PER_MM);
        let page_h = Mm(self.page.height / PT_PER_MM);

        let mut doc = PdfDocument::new(&self.title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(images.len());
        let mut previews: Vec<PagePreview> = Vec::with_capacity(images.len());

        for (index, staged) in images.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(index, "Composition cancelled");
                return Err(SnapbindError::Cancelled);
            }

            let decoded = image::load_from_memory(staged.data())
                .map_err(|err| SnapbindError::decode(staged.name(), err))?;
            let (px_w, px_h) = (decoded.width(), decoded.height());
            let placement = fit_to_page(px_w, px_h, &self.page)
                .ok_or_else(|| SnapbindError::decode(staged.name(), "image has no pixels"))?;

            let rgb = flatten_onto_white(&decoded);
            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: px_w as usize,
                height: px_h as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            // PDF space has its origin at the bottom-left corner.
            let translate_y = self.page.height - placement.y - placement.height;
            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(placement.x)),
                    translate_y: Some(Pt(translate_y)),
                    scale_x: Some(placement.width / px_w as f32),
                    scale_y: Some(placement.height / px_h as f32),
                    dpi: Some(PLACEMENT_DPI),
                    rotate: None,
                },
            }];
            pages.push(PdfPage::new(page_w, page_h, ops));

            debug!(
                index,
                name = staged.name(),
                px_w,
                px_h,
                x = placement.x,
                y = placement.y,
                w = placement.width,
                h = placement.height,
                "Image placed on page"
            );

            let preview = PagePreview {
                index,
                image_id: staged.id(),
                name: staged.name().to_string(),
                pixel_width: px_w,
                pixel_height: px_h,
                placement,
            };
            on_page(&preview);
            previews.push(preview);
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }
        if bytes.is_empty() {
            return Err(SnapbindError::export("PDF serialisation produced no output"));
        }

        info!(pages = previews.len(), bytes = bytes.len(), "PDF composed");

        Ok(ComposedDocument {
            bytes,
            pages: previews,
            geometry: self.page,
        })
    }
}

impl Default for DocumentComposer {
    fn default() -> Self {
        Self::new(PageGeometry::default())
    }
}

impl ComposedDocument {
    /// The PDF byte stream, as offered for download.
    pub fn to_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The PDF byte stream as standard base64 text.
    pub fn to_base64(&self) -> String {
        encode::to_base64(&self.bytes)
    }

    /// Per-page layout, in page order.
    pub fn preview(&self) -> &[PagePreview] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Write the PDF bytes to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(())
    }
}

/// Convert to RGB8, compositing any transparency over a white page.
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let image::Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = a as u32;
        let blend = |channel: u8| -> u8 {
            ((channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn staged(name: &str, width: u32, height: u32) -> StagedImage {
        StagedImage::new(name, "image/png", png(width, height))
    }

    #[test]
    fn empty_input_is_nothing_to_export() {
        let result = DocumentComposer::default().compose(&[]);
        assert!(matches!(result, Err(SnapbindError::NothingToExport)));
    }

    #[test]
    fn one_page_per_image_in_order() {
        let images = vec![staged("a", 40, 20), staged("b", 20, 40), staged("c", 10, 10)];
        let doc = DocumentComposer::default().compose(&images).unwrap();

        assert_eq!(doc.page_count(), 3);
        let names: Vec<&str> = doc.preview().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        for (i, page) in doc.preview().iter().enumerate() {
            assert_eq!(page.index, i);
            assert_eq!(page.image_id, images[i].id());
        }
        assert!(doc.to_bytes().starts_with(b"%PDF"));
    }

    #[test]
    fn preview_matches_layout() {
        let page = PageGeometry::new(595.0, 840.0, 20.0);
        let doc = DocumentComposer::new(page)
            .compose(&[staged("wide", 400, 200)])
            .unwrap();
        let preview = &doc.preview()[0];
        assert_eq!((preview.pixel_width, preview.pixel_height), (400, 200));
        assert_eq!(Some(preview.placement), fit_to_page(400, 200, &page));
    }

    #[test]
    fn undecodable_image_aborts_with_its_name() {
        let images = vec![
            staged("good", 8, 8),
            StagedImage::new("broken.png", "image/png", b"not really a png".to_vec()),
            staged("never-reached", 8, 8),
        ];
        match DocumentComposer::default().compose(&images) {
            Err(SnapbindError::Decode { name, .. }) => assert_eq!(name, "broken.png"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn cancelled_flag_stops_composition() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let result =
            DocumentComposer::default().compose_with_cancel(&[staged("a", 4, 4)], &cancel);
        assert!(matches!(result, Err(SnapbindError::Cancelled)));
    }

    #[test]
    fn cancel_between_images_returns_no_document() {
        let images = vec![staged("a", 4, 4), staged("b", 4, 4), staged("c", 4, 4)];
        let cancel = CancelFlag::new();
        let mut laid_out = Vec::new();

        let result = DocumentComposer::default().compose_pages(&images, &cancel, |page| {
            laid_out.push(page.index);
            cancel.cancel();
        });

        assert!(matches!(result, Err(SnapbindError::Cancelled)));
        assert_eq!(laid_out, [0]);
    }

    #[test]
    fn base64_is_the_same_document() {
        let doc = DocumentComposer::default()
            .compose(&[staged("a", 16, 9)])
            .unwrap();
        let decoded = encode::from_base64(&doc.to_base64()).unwrap();
        assert_eq!(decoded, doc.to_bytes());
    }

    #[test]
    fn composition_leaves_input_untouched() {
        let images = vec![staged("a", 12, 12)];
        let before = images[0].data().to_vec();
        DocumentComposer::default().compose(&images).unwrap();
        assert_eq!(images[0].data(), before.as_slice());
    }

    #[test]
    fn transparency_flattens_to_white() {
        let mut rgba = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(flat.get_pixel(1, 0), &Rgb([10, 20, 30]));
    }
}
