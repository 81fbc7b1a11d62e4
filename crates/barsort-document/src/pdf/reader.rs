// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open existing PDF documents and re-emit their pages in a new
// order, without some of them, or concatenated with other documents, using
// the `lopdf` crate.
//
// Every operation works on a clone of the loaded document and rewrites its
// page tree flat: the root /Pages node gets the requested /Kids, each page
// points straight at the root, and inheritable attributes that used to come
// from intermediate nodes are copied onto the pages first.

use std::collections::BTreeSet;
use std::path::Path;

use barsort_core::SortedSequence;
use barsort_core::error::{BarsortError, Result};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info, instrument};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed page trees with /Parent cycles.
const MAX_TREE_DEPTH: usize = 64;

/// Reads an existing PDF and re-emits its pages.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    ///
    /// Fails with [`BarsortError::InputMissing`] before attempting to parse
    /// when the path does not exist.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(BarsortError::InputMissing(path_ref.to_path_buf()));
        }
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BarsortError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            BarsortError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    // -- Re-emission ----------------------------------------------------------

    /// Emit every page in the order given by `sequence`.
    ///
    /// The output has exactly as many pages as the source; each source page
    /// appears once, at the position its record holds in the sequence.
    #[instrument(skip_all, fields(pages = sequence.len()))]
    pub fn reassemble(&self, sequence: &SortedSequence) -> Result<Vec<u8>> {
        let ids = page_ids(&self.document);
        if sequence.len() != ids.len() {
            return Err(BarsortError::InvalidSequence(format!(
                "sequence has {} pages but the document has {}",
                sequence.len(),
                ids.len()
            )));
        }

        let order: Vec<ObjectId> = sequence.source_order().into_iter().map(|i| ids[i]).collect();

        let mut document = self.document.clone();
        rebuild_page_tree(&mut document, &order)?;

        info!(pages = order.len(), "Pages reordered");
        serialise(&mut document, "reordered PDF")
    }

    /// Remove the given pages (1-indexed).
    ///
    /// Every page number is checked before anything is changed; one page out
    /// of range rejects the whole request.
    #[instrument(skip(self))]
    pub fn delete_pages(&self, page_numbers: &[u32]) -> Result<Vec<u8>> {
        let ids = page_ids(&self.document);
        let total = ids.len();

        if let Some(&page) = page_numbers
            .iter()
            .find(|&&p| p == 0 || p as usize > total)
        {
            return Err(BarsortError::PageOutOfRange { page, total });
        }

        let removed: BTreeSet<usize> = page_numbers.iter().map(|&p| p as usize - 1).collect();
        for index in &removed {
            debug!(page = index + 1, "Deleting page");
        }

        let keep: Vec<ObjectId> = ids
            .iter()
            .enumerate()
            .filter(|(index, _)| !removed.contains(index))
            .map(|(_, id)| *id)
            .collect();

        let mut document = self.document.clone();
        rebuild_page_tree(&mut document, &keep)?;

        info!(
            original_pages = total,
            kept_pages = keep.len(),
            removed_pages = removed.len(),
            "Pages deleted"
        );
        serialise(&mut document, "PDF after page deletion")
    }

    /// Concatenate this document with others. Pages appear in the order:
    /// self, then each supplied document in order.
    #[instrument(skip_all, fields(additional_count = others.len()))]
    pub fn merge(&self, others: &[PdfReader]) -> Result<Vec<u8>> {
        info!(
            base_pages = self.page_count(),
            additional_documents = others.len(),
            "Merging PDFs"
        );

        let mut merged = self.document.clone();
        let mut order = page_ids(&merged);

        for other in others {
            let mut incoming = other.document.clone();
            incoming.renumber_objects_with(merged.max_id + 1);

            order.extend(page_ids(&incoming));
            merged.max_id = merged.max_id.max(incoming.max_id);
            merged.objects.extend(incoming.objects);
        }

        rebuild_page_tree(&mut merged, &order)?;

        debug!(pages = order.len(), "Merge complete");
        serialise(&mut merged, "merged PDF")
    }
}

// -- Page tree helpers --------------------------------------------------------

/// Page object ids in document order.
fn page_ids(document: &Document) -> Vec<ObjectId> {
    document.get_pages().into_values().collect()
}

/// Object id of the root /Pages node.
fn pages_root_id(document: &Document) -> Result<ObjectId> {
    let catalog = document
        .catalog()
        .map_err(|err| BarsortError::PdfError(format!("no catalog: {}", err)))?;
    catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|err| BarsortError::PdfError(format!("no /Pages root: {}", err)))
}

/// Replace the page tree with a single level holding `order`, then drop
/// everything no longer reachable (intermediate nodes, removed pages).
fn rebuild_page_tree(document: &mut Document, order: &[ObjectId]) -> Result<()> {
    let root_id = pages_root_id(document)?;

    for &page_id in order {
        flatten_inherited(document, page_id)?;
    }

    for &page_id in order {
        let page = document.get_dictionary_mut(page_id).map_err(|err| {
            BarsortError::PdfError(format!("page object {:?} unavailable: {}", page_id, err))
        })?;
        page.set("Parent", Object::Reference(root_id));
    }

    let kids: Vec<Object> = order.iter().map(|&id| Object::Reference(id)).collect();
    let root = document
        .get_dictionary_mut(root_id)
        .map_err(|err| BarsortError::PdfError(format!("/Pages root unavailable: {}", err)))?;
    root.set("Kids", kids);
    root.set("Count", order.len() as i64);

    let pruned = document.prune_objects();
    debug!(pruned = pruned.len(), "Page tree rebuilt");
    Ok(())
}

/// Copy attributes the page inherits from its ancestors onto the page itself.
fn flatten_inherited(document: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = document.get_dictionary(page_id).map_err(|err| {
        BarsortError::PdfError(format!("page object {:?} unavailable: {}", page_id, err))
    })?;

    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = document.get_dictionary(node_id) else {
            break;
        };
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    if inherited.is_empty() {
        return Ok(());
    }

    let page = document.get_dictionary_mut(page_id).map_err(|err| {
        BarsortError::PdfError(format!("page object {:?} unavailable: {}", page_id, err))
    })?;
    for (key, value) in inherited {
        page.set(key, value);
    }
    Ok(())
}

fn serialise(document: &mut Document, what: &str) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    document
        .save_to(&mut output)
        .map_err(|err| BarsortError::PdfError(format!("failed to serialise {}: {}", what, err)))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barsort_core::{Label, PageRecord};
    use lopdf::{Stream, dictionary};

    /// Build a PDF whose pages carry a `/BarsortTag` integer each. The second
    /// half of the pages sits under an intermediate /Pages node that supplies
    /// `/Rotate`; the root supplies `/MediaBox`.
    fn fixture(tags: &[i64]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let root_id = doc.new_object_id();
        let nested_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, b"BT ET".to_vec()));

        let split = tags.len() / 2;
        let mut root_kids: Vec<Object> = Vec::new();
        let mut nested_kids: Vec<Object> = Vec::new();
        for (i, tag) in tags.iter().enumerate() {
            let parent = if i < split { root_id } else { nested_id };
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => parent,
                "Contents" => content_id,
                "BarsortTag" => Object::Integer(*tag),
            });
            if i < split {
                root_kids.push(page_id.into());
            } else {
                nested_kids.push(page_id.into());
            }
        }

        let nested_count = nested_kids.len() as i64;
        doc.objects.insert(
            nested_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Parent" => root_id,
                "Kids" => nested_kids,
                "Count" => Object::Integer(nested_count),
                "Rotate" => Object::Integer(90),
            }),
        );
        root_kids.push(nested_id.into());
        doc.objects.insert(
            root_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => root_kids,
                "Count" => Object::Integer(tags.len() as i64),
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => root_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    fn tags(bytes: &[u8]) -> Vec<i64> {
        let doc = Document::load_mem(bytes).unwrap();
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

    fn sequence(labels: &[&str]) -> SortedSequence {
        let records = labels
            .iter()
            .enumerate()
            .map(|(i, l)| PageRecord::new(Label::Decoded(l.to_string()), i))
            .collect();
        SortedSequence::sort(records).unwrap()
    }

    #[test]
    fn fixture_has_expected_order() {
        let reader = PdfReader::from_bytes(&fixture(&[10, 11, 12, 13])).unwrap();
        assert_eq!(reader.page_count(), 4);
        assert_eq!(tags(&fixture(&[10, 11, 12, 13])), vec![10, 11, 12, 13]);
    }

    #[test]
    fn reassemble_follows_sequence_order() {
        let reader = PdfReader::from_bytes(&fixture(&[0, 1, 2, 3, 4])).unwrap();
        let seq = sequence(&["0003", "0001", "0009", "0001", "0005"]);
        assert_eq!(seq.source_order(), vec![1, 3, 0, 4, 2]);

        let output = reader.reassemble(&seq).unwrap();
        assert_eq!(tags(&output), vec![1, 3, 0, 4, 2]);
    }

    #[test]
    fn reassemble_keeps_inherited_attributes() {
        let reader = PdfReader::from_bytes(&fixture(&[0, 1, 2, 3])).unwrap();
        let seq = sequence(&["d", "c", "b", "a"]);
        let output = reader.reassemble(&seq).unwrap();

        let doc = Document::load_mem(&output).unwrap();
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        assert_eq!(pages.len(), 4);
        for (position, id) in pages.iter().enumerate() {
            let page = doc.get_dictionary(*id).unwrap();
            assert!(page.get(b"MediaBox").is_ok());
            let tag = page.get(b"BarsortTag").unwrap().as_i64().unwrap();
            // Tags 2 and 3 lived under the rotated intermediate node.
            let rotated = page.get(b"Rotate").and_then(Object::as_i64).ok() == Some(90);
            assert_eq!(rotated, tag >= 2, "page at position {position}");
        }
    }

    #[test]
    fn reassemble_rejects_length_mismatch() {
        let reader = PdfReader::from_bytes(&fixture(&[0, 1, 2])).unwrap();
        let seq = sequence(&["a", "b"]);
        assert!(matches!(
            reader.reassemble(&seq),
            Err(BarsortError::InvalidSequence(_))
        ));
    }

    #[test]
    fn delete_pages_removes_requested() {
        let reader = PdfReader::from_bytes(&fixture(&[0, 1, 2, 3, 4, 5])).unwrap();
        let output = reader.delete_pages(&[2, 5, 2]).unwrap();
        assert_eq!(tags(&output), vec![0, 2, 3, 5]);
    }

    #[test]
    fn delete_pages_out_of_range_is_rejected() {
        let reader = PdfReader::from_bytes(&fixture(&[0, 1, 2])).unwrap();
        assert!(matches!(
            reader.delete_pages(&[1, 4]),
            Err(BarsortError::PageOutOfRange { page: 4, total: 3 })
        ));
        assert!(reader.delete_pages(&[0]).is_err());
    }

    #[test]
    fn merge_appends_in_argument_order() {
        let base = PdfReader::from_bytes(&fixture(&[1, 2])).unwrap();
        let second = PdfReader::from_bytes(&fixture(&[3, 4, 5])).unwrap();
        let third = PdfReader::from_bytes(&fixture(&[6])).unwrap();

        let output = base.merge(&[second, third]).unwrap();
        assert_eq!(tags(&output), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn open_missing_file_is_input_missing() {
        let err = PdfReader::open("/no/such/scan.pdf").err().unwrap();
        assert!(matches!(err, BarsortError::InputMissing(_)));
    }

    #[test]
    fn open_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, fixture(&[7, 8])).unwrap();

        let reader = PdfReader::open(&path).unwrap();
        assert_eq!(reader.page_count(), 2);
    }
}
