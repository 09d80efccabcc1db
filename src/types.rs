//! Core record types for rfcmap.
//!
//! Two record shapes flow through the pipeline: `IndexEntry`, the raw
//! projection of one `<rfc-entry>` from rfc-index.xml, and `RfcRecord`, the
//! reconciled entity that also carries the two derived reference lists.
//!
//! Field order on `RfcRecord` is load-bearing: it mirrors the `rfc_entries`
//! column order exactly, and the store's bulk insert binds by position.
//! Absent values stay `None` all the way to the database - `None` means
//! "no value" (a nullable column), never "empty list".

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ident::DocId;

/// Intermediate interchange artifact: per-document sets of raw reference
/// URLs, keyed by canonical identifier. Serialized as JSON between the
/// extract and build stages for caching and debugging.
pub type ReferencesMap = BTreeMap<DocId, BTreeSet<String>>;

/// One author of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
    pub title: Option<String>,
}

/// Publication date. The index often carries only month and year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocDate {
    pub day: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

/// Raw projection of one `<rfc-entry>` element.
///
/// All fields except `doc_id` are opaque to the core: they are copied
/// field-by-field from the index markup and carried through unchanged
/// (identifier list fields get zero-strip normalization at reconciliation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub doc_id: String,
    pub title: Option<String>,
    pub author: Vec<Author>,
    pub date: DocDate,
    pub format: Option<Vec<String>>,
    pub page_count: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub is_also: Option<Vec<String>>,
    pub obsoletes: Option<Vec<String>>,
    pub obsoleted_by: Option<Vec<String>>,
    pub updates: Option<Vec<String>>,
    pub updated_by: Option<Vec<String>>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub see_also: Option<Vec<String>>,
    pub draft: Option<String>,
    pub current_status: Option<String>,
    pub publication_status: Option<String>,
    pub stream: Option<String>,
    pub errata_url: Option<String>,
    pub area: Option<String>,
    pub wg_acronym: Option<String>,
    pub doi: Option<String>,
}

/// The reconciled record, one per index document.
///
/// Field order here IS the `rfc_entries` column order - `references` and
/// `referenced_by` sit between `see_also` and `abstract`, not at the tail.
/// The downstream bulk insert binds by position, so reordering fields is a
/// schema change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfcRecord {
    pub doc_id: String,
    pub title: Option<String>,
    pub author: Vec<Author>,
    pub date: DocDate,
    pub format: Option<Vec<String>>,
    pub page_count: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub is_also: Option<Vec<String>>,
    pub obsoletes: Option<Vec<String>>,
    pub obsoleted_by: Option<Vec<String>>,
    pub updates: Option<Vec<String>>,
    pub updated_by: Option<Vec<String>>,
    pub see_also: Option<Vec<String>>,
    pub references: Option<Vec<String>>,
    pub referenced_by: Option<Vec<String>>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub draft: Option<String>,
    pub current_status: Option<String>,
    pub publication_status: Option<String>,
    pub stream: Option<String>,
    pub errata_url: Option<String>,
    pub area: Option<String>,
    pub wg_acronym: Option<String>,
    pub doi: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_map_serializes_with_canonical_keys() {
        let mut map = ReferencesMap::new();
        map.entry(DocId::rfc(100))
            .or_default()
            .insert("http://www.rfc-editor.org/info/rfc50".to_string());

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"RFC100\""));

        let back: ReferencesMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_references_map_keys_order_numerically() {
        let mut map = ReferencesMap::new();
        for n in [10, 2, 9] {
            map.insert(DocId::rfc(n), BTreeSet::new());
        }
        let keys: Vec<_> = map.keys().map(|id| id.to_string()).collect();
        assert_eq!(keys, ["RFC2", "RFC9", "RFC10"]);
    }

    #[test]
    fn test_abstract_field_renames_over_serde() {
        let entry = IndexEntry {
            doc_id: "RFC1".to_string(),
            abstract_text: Some("Host software.".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"abstract\":\"Host software.\""));
        assert!(!json.contains("abstract_text"));
    }
}
