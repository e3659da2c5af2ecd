// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end: stage images from disk, compose, and check all three exports
// agree with each other and with the workspace.

use std::io::{Cursor, Read};
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use snapbind_core::types::PageGeometry;
use snapbind_core::{SnapbindError, Workspace};
use snapbind_document::pdf::inspect;
use snapbind_document::{DocumentComposer, build_archive, encode, intake};

fn write_image(path: &Path, width: u32, height: u32, format: ImageFormat) {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 120, 200]));
    DynamicImage::ImageRgb8(img)
        .save_with_format(path, format)
        .unwrap();
}

fn staged_workspace(dir: &Path) -> Workspace {
    write_image(&dir.join("01-wide.png"), 400, 200, ImageFormat::Png);
    write_image(&dir.join("02-tall.jpg"), 120, 480, ImageFormat::Jpeg);
    write_image(&dir.join("03-square.png"), 64, 64, ImageFormat::Png);
    std::fs::write(dir.join("04-notes.txt"), "not an image").unwrap();

    let mut ws = Workspace::new();
    let report = intake::stage_all(&mut ws, &[dir.to_path_buf()]).unwrap();
    assert_eq!(report.accepted.len(), 3);
    assert_eq!(report.rejected.len(), 1);
    ws
}

#[test]
fn pdf_has_one_page_per_staged_image() {
    let dir = tempfile::tempdir().unwrap();
    let ws = staged_workspace(dir.path());

    let doc = DocumentComposer::default().compose(ws.images()).unwrap();
    assert_eq!(doc.page_count(), 3);
    assert_eq!(inspect::page_count(doc.to_bytes()).unwrap(), 3);

    let path = dir.path().join("out.pdf");
    doc.write_to_file(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), doc.to_bytes());
}

#[test]
fn removing_an_image_drops_one_page_and_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut ws = staged_workspace(dir.path());
    let middle = ws.images()[1].id();
    ws.remove(middle).unwrap();

    let doc = DocumentComposer::default().compose(ws.images()).unwrap();
    let names: Vec<&str> = doc.preview().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["01-wide.png", "03-square.png"]);
    assert_eq!(inspect::page_count(doc.to_bytes()).unwrap(), 2);
}

#[test]
fn wide_image_lands_where_expected() {
    let dir = tempfile::tempdir().unwrap();
    let ws = staged_workspace(dir.path());

    let page = PageGeometry::new(595.0, 840.0, 20.0);
    let doc = DocumentComposer::new(page).compose(ws.images()).unwrap();
    let wide = doc.preview()[0].placement;
    assert!((wide.width - 555.0).abs() < 1e-3);
    assert!((wide.height - 277.5).abs() < 1e-3);
    assert!((wide.x - 20.0).abs() < 1e-3);
    assert!((wide.y - 281.25).abs() < 1e-3);
}

#[test]
fn base64_export_decodes_to_pdf_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let ws = staged_workspace(dir.path());

    let doc = DocumentComposer::default().compose(ws.images()).unwrap();
    let text = doc.to_base64();
    assert_eq!(encode::from_base64(&text).unwrap(), doc.to_bytes());
}

#[test]
fn archive_holds_original_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let ws = staged_workspace(dir.path());

    let bytes = build_archive(ws.images()).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let expected = ["image-1.png", "image-2.jpeg", "image-3.png"];
    assert_eq!(archive.len(), expected.len());

    for (i, name) in expected.iter().enumerate() {
        let mut entry = archive.by_name(name).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, ws.images()[i].data(), "{name} was re-encoded");
    }
}

#[test]
fn cleared_workspace_has_nothing_to_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut ws = staged_workspace(dir.path());
    ws.clear();

    assert!(matches!(
        DocumentComposer::default().compose(ws.images()),
        Err(SnapbindError::NothingToExport)
    ));
    assert!(matches!(
        build_archive(ws.images()),
        Err(SnapbindError::NothingToExport)
    ));
}
