//! Interval indexing across many documents.
//!
//! [`DocumentIndex`] keeps one [`SpanTree`] per document name, so queries
//! against one document never touch the intervals of another.
//!
//! # Examples
//!
//! ```
//! use spantree_index::document_index::IntoDocumentIndex;
//! use spantree_index::PredicateKind;
//! use spantree_core::models::SpanRecord;
//!
//! let records = vec![
//!     SpanRecord { document: "main.rs".to_string(), start: 0, length: 3, label: Some("E0308".to_string()) },
//!     SpanRecord { document: "main.rs".to_string(), start: 5, length: 2, label: None },
//!     SpanRecord { document: "lib.rs".to_string(), start: 0, length: 40, label: None },
//! ];
//!
//! let index = records.into_document_index().unwrap();
//!
//! let hits = index.query("main.rs", 1, 5, PredicateKind::Overlaps, false).unwrap();
//! assert_eq!(hits.len(), 2);
//! assert_eq!(index.any("lib.rs", 100, 1, PredicateKind::Overlaps).unwrap(), false);
//! ```

use fxhash::FxHashMap as HashMap;
use spantree_core::errors::SpanResult;
use spantree_core::models::{RecordSpan, Span, SpanRecord};

use crate::predicates::PredicateKind;
use crate::tree::SpanTree;

/// The tree type built for each document.
pub type RecordTree = SpanTree<SpanRecord, RecordSpan>;

/// One [`RecordTree`] per document.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    trees: HashMap<String, RecordTree>,
}

impl DocumentIndex {
    ///
    /// Group `records` by document and build a tree for each group.
    ///
    /// # Errors
    /// - [`spantree_core::errors::SpanError`] if any record has a negative length
    ///   or an end past `i64::MAX`
    ///
    pub fn build(records: Vec<SpanRecord>) -> SpanResult<Self> {
        let mut grouped: HashMap<String, Vec<SpanRecord>> = HashMap::default();
        for record in records.into_iter() {
            Span::from_start_length(record.start, record.length)?;
            grouped
                .entry(record.document.clone())
                .or_default()
                .push(record);
        }

        let mut trees = HashMap::default();
        trees.reserve(grouped.len());
        for (document, document_records) in grouped.into_iter() {
            let tree = SpanTree::build(document_records, RecordSpan)?;
            trees.insert(document, tree);
        }

        log::debug!("indexed {} documents", trees.len());
        Ok(DocumentIndex { trees })
    }

    pub fn get(&self, document: &str) -> Option<&RecordTree> {
        self.trees.get(document)
    }

    /// Document names in lexicographic order.
    pub fn documents(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Total number of records over all documents.
    pub fn record_count(&self) -> usize {
        self.trees.values().map(SpanTree::len).sum()
    }

    ///
    /// Records of `document` matching `kind` against `[start, start + length)`,
    /// ascending by start. An unknown document has no matches.
    ///
    pub fn query(
        &self,
        document: &str,
        start: i64,
        length: i64,
        kind: PredicateKind,
        first_only: bool,
    ) -> SpanResult<Vec<&SpanRecord>> {
        Span::from_start_length(start, length)?;

        let mut hits = Vec::new();
        if let Some(tree) = self.trees.get(document) {
            tree.collect_matching(
                start,
                length,
                |record, start, length, introspector| {
                    kind.matches(record, start, length, introspector)
                },
                &mut hits,
                first_only,
            )?;
        }
        Ok(hits)
    }

    /// Whether any record of `document` matches `kind` against `[start, start + length)`.
    pub fn any(
        &self,
        document: &str,
        start: i64,
        length: i64,
        kind: PredicateKind,
    ) -> SpanResult<bool> {
        Span::from_start_length(start, length)?;

        match self.trees.get(document) {
            Some(tree) => tree.any_overlap(start, length, |record, start, length, introspector| {
                kind.matches(record, start, length, introspector)
            }),
            None => Ok(false),
        }
    }
}

/// Conversion of a record collection into a [`DocumentIndex`].
pub trait IntoDocumentIndex {
    fn into_document_index(self) -> SpanResult<DocumentIndex>;
}

impl IntoDocumentIndex for Vec<SpanRecord> {
    fn into_document_index(self) -> SpanResult<DocumentIndex> {
        DocumentIndex::build(self)
    }
}
