//! Reconciliation: join the cross-reference graph onto the index records.
//!
//! The index and the text corpus were produced independently and disagree
//! about identifier spelling: the index zero-pads (`RFC0005`), the graph
//! keys are minimal-digit (`RFC5`). Without normalization the join would
//! silently miss and every reference column would come out empty. Every
//! identifier - the record's own, the members of its embedded
//! cross-reference lists, and the lookup key - goes through the same
//! zero-strip normalization before the join.
//!
//! Reconciliation borrows its inputs read-only and produces a new record
//! collection; graph absence becomes the record's `None` (the nullable
//! column), never an empty list.

use tracing::warn;

use crate::graph::XrefGraph;
use crate::ident::{normalize_token, DocId};
use crate::types::{IndexEntry, RfcRecord};

/// Produce one enriched record per index entry.
pub fn reconcile(entries: &[IndexEntry], graph: &XrefGraph) -> Vec<RfcRecord> {
    entries.iter().map(|e| reconcile_entry(e, graph)).collect()
}

fn reconcile_entry(entry: &IndexEntry, graph: &XrefGraph) -> RfcRecord {
    // The canonical identifier is both the stored doc_id and the graph join
    // key. Index doc-ids are expected to parse; one that does not is carried
    // through verbatim and simply cannot join the graph.
    let id = DocId::parse(&entry.doc_id);
    if id.is_none() {
        warn!(doc_id = %entry.doc_id, "index doc-id is not an identifier token");
    }

    let references = id
        .as_ref()
        .and_then(|id| graph.references(id))
        .map(render_ids);
    let referenced_by = id
        .as_ref()
        .and_then(|id| graph.referenced_by(id))
        .map(render_ids);

    RfcRecord {
        doc_id: id
            .as_ref()
            .map(DocId::to_string)
            .unwrap_or_else(|| entry.doc_id.clone()),
        title: entry.title.clone(),
        author: entry.author.clone(),
        date: entry.date.clone(),
        format: entry.format.clone(),
        page_count: entry.page_count.clone(),
        keywords: entry.keywords.clone(),
        is_also: normalize_list(&entry.is_also),
        obsoletes: normalize_list(&entry.obsoletes),
        obsoleted_by: normalize_list(&entry.obsoleted_by),
        updates: normalize_list(&entry.updates),
        updated_by: normalize_list(&entry.updated_by),
        see_also: normalize_list(&entry.see_also),
        references,
        referenced_by,
        abstract_text: entry.abstract_text.clone(),
        draft: entry.draft.clone(),
        current_status: entry.current_status.clone(),
        publication_status: entry.publication_status.clone(),
        stream: entry.stream.clone(),
        errata_url: entry.errata_url.clone(),
        area: entry.area.clone(),
        wg_acronym: entry.wg_acronym.clone(),
        doi: entry.doi.clone(),
    }
}

fn render_ids(ids: &[DocId]) -> Vec<String> {
    ids.iter().map(DocId::to_string).collect()
}

/// Zero-strip every member of an embedded cross-reference list, preserving
/// order and absence.
fn normalize_list(list: &Option<Vec<String>>) -> Option<Vec<String>> {
    list.as_ref()
        .map(|items| items.iter().map(|item| normalize_token(item)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn entry(doc_id: &str) -> IndexEntry {
        IndexEntry {
            doc_id: doc_id.to_string(),
            ..Default::default()
        }
    }

    fn graph(edges: &[(u32, u32)]) -> XrefGraph {
        let mut docs: std::collections::BTreeMap<DocId, BTreeSet<DocId>> = Default::default();
        for &(from, to) in edges {
            docs.entry(DocId::rfc(from)).or_default().insert(DocId::rfc(to));
        }
        XrefGraph::build(docs)
    }

    #[test]
    fn test_zero_padded_doc_id_joins_graph() {
        // Index spells RFC0005; the graph keys RFC5. The lookup must hit.
        let graph = graph(&[(5, 1), (7, 5)]);
        let records = reconcile(&[entry("RFC0005")], &graph);

        let record = &records[0];
        assert_eq!(record.doc_id, "RFC5");
        assert_eq!(record.references.as_deref(), Some(&["RFC1".to_string()][..]));
        assert_eq!(
            record.referenced_by.as_deref(),
            Some(&["RFC7".to_string()][..])
        );
    }

    #[test]
    fn test_graph_absence_is_none_not_empty() {
        let records = reconcile(&[entry("RFC0042")], &XrefGraph::default());
        assert_eq!(records[0].references, None);
        assert_eq!(records[0].referenced_by, None);
    }

    #[test]
    fn test_embedded_lists_are_zero_stripped() {
        let mut e = entry("RFC0010");
        e.obsoletes = Some(vec!["RFC0003".to_string()]);
        e.updated_by = Some(vec!["RFC0024".to_string(), "RFC0027".to_string()]);
        e.is_also = Some(vec!["BCP0090".to_string()]);

        let records = reconcile(&[e], &XrefGraph::default());
        let record = &records[0];
        assert_eq!(record.obsoletes.as_deref(), Some(&["RFC3".to_string()][..]));
        assert_eq!(
            record.updated_by.as_deref(),
            Some(&["RFC24".to_string(), "RFC27".to_string()][..])
        );
        assert_eq!(record.is_also.as_deref(), Some(&["BCP90".to_string()][..]));
    }

    #[test]
    fn test_absent_embedded_lists_stay_absent() {
        let records = reconcile(&[entry("RFC1")], &XrefGraph::default());
        assert_eq!(records[0].obsoletes, None);
        assert_eq!(records[0].see_also, None);
    }

    #[test]
    fn test_opaque_fields_copied_unchanged() {
        let mut e = entry("RFC0001");
        e.title = Some("Host Software".to_string());
        e.doi = Some("10.17487/RFC0001".to_string());
        e.page_count = Some("11".to_string());

        let records = reconcile(&[e], &XrefGraph::default());
        let record = &records[0];
        assert_eq!(record.title.as_deref(), Some("Host Software"));
        // The DOI embeds a padded identifier but is not a cross-reference
        // list field: it passes through untouched.
        assert_eq!(record.doi.as_deref(), Some("10.17487/RFC0001"));
        assert_eq!(record.page_count.as_deref(), Some("11"));
    }

    #[test]
    fn test_attached_lists_arrive_in_numeric_order() {
        let graph = graph(&[(1, 10), (1, 2), (1, 9)]);
        let records = reconcile(&[entry("RFC0001")], &graph);
        assert_eq!(
            records[0].references.as_deref(),
            Some(&["RFC2".to_string(), "RFC9".to_string(), "RFC10".to_string()][..])
        );
    }

    #[test]
    fn test_one_record_per_entry() {
        let records = reconcile(
            &[entry("RFC1"), entry("RFC2"), entry("RFC3")],
            &XrefGraph::default(),
        );
        assert_eq!(records.len(), 3);
    }
}
