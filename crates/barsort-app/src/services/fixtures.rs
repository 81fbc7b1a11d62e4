// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test fixtures — tagged PDFs built in memory.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, Stream, dictionary};

/// Write a PDF whose pages carry `/BarsortTag` values `tags`, in order.
pub fn tagged_pdf(dir: &Path, name: &str, tags: &[i64]) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, b"BT ET".to_vec()));

    let kids: Vec<Object> = tags
        .iter()
        .map(|tag| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "BarsortTag" => Object::Integer(*tag),
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(tags.len() as i64),
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// `/BarsortTag` of every page of the PDF at `path`, in page order.
pub fn page_tags(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|id| {
            doc.get_dictionary(*id)
                .unwrap()
                .get(b"BarsortTag")
                .unwrap()
                .as_i64()
                .unwrap()
        })
        .collect()
}
