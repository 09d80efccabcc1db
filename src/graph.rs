//! The corpus-wide cross-reference graph.
//!
//! Two mappings make up the graph: `forward` (which documents does d cite)
//! and `reverse` (which documents cite d), a transpose-consistent pair -
//! every edge (a, b) appears as b in forward[a] and a in reverse[b], with no
//! dangling entries on one side only.
//!
//! The representation is deliberately an ordered-map-of-growable-sequence,
//! not a general graph structure: the two sorted adjacency lists ARE the
//! persisted shape, and nothing downstream runs graph algorithms over them.
//! Lists are created lazily on first edge; a document with no citations in
//! a direction simply has no entry there (absence, not an empty list - the
//! reconciliation layer turns absence into the store's no-value marker).
//!
//! The graph is rebuilt from scratch each run. After construction every
//! list is sorted by the numeric value of the identifier suffix, which makes
//! the output a total, deterministic order independent of input iteration
//! order - required for reproducible, diffable persisted state.

use std::collections::{BTreeMap, BTreeSet};

use crate::ident::DocId;

/// The forward and reverse reference mappings over the whole corpus.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct XrefGraph {
    forward: BTreeMap<DocId, Vec<DocId>>,
    reverse: BTreeMap<DocId, Vec<DocId>>,
}

impl XrefGraph {
    /// Build the graph from per-document canonical reference sets.
    ///
    /// Self-references are dropped. The per-document sets are already
    /// deduplicated, so no list can hold the same edge twice. After all
    /// documents are folded in, every list in both mappings is sorted
    /// ascending by numeric suffix.
    pub fn build<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (DocId, BTreeSet<DocId>)>,
    {
        let mut forward: BTreeMap<DocId, Vec<DocId>> = BTreeMap::new();
        let mut reverse: BTreeMap<DocId, Vec<DocId>> = BTreeMap::new();

        for (doc, targets) in documents {
            for target in targets {
                if target == doc {
                    continue;
                }
                forward.entry(doc.clone()).or_default().push(target.clone());
                reverse.entry(target).or_default().push(doc.clone());
            }
        }

        for list in forward.values_mut().chain(reverse.values_mut()) {
            list.sort();
        }

        Self { forward, reverse }
    }

    /// Documents cited by `id`, in numeric order. `None` if `id` cites
    /// nothing.
    pub fn references(&self, id: &DocId) -> Option<&[DocId]> {
        self.forward.get(id).map(Vec::as_slice)
    }

    /// Documents citing `id`, in numeric order. `None` if nothing cites
    /// `id`.
    pub fn referenced_by(&self, id: &DocId) -> Option<&[DocId]> {
        self.reverse.get(id).map(Vec::as_slice)
    }

    /// Number of documents with outgoing references.
    pub fn citing_count(&self) -> usize {
        self.forward.len()
    }

    /// Number of documents with incoming references.
    pub fn cited_count(&self) -> usize {
        self.reverse.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.forward.values().map(Vec::len).sum()
    }

    /// Iterate the forward mapping in key order.
    pub fn iter_forward(&self) -> impl Iterator<Item = (&DocId, &[DocId])> {
        self.forward.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Iterate the reverse mapping in key order.
    pub fn iter_reverse(&self) -> impl Iterator<Item = (&DocId, &[DocId])> {
        self.reverse.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(n: u32) -> DocId {
        DocId::rfc(n)
    }

    fn refs(targets: &[u32]) -> BTreeSet<DocId> {
        targets.iter().copied().map(DocId::rfc).collect()
    }

    #[test]
    fn test_forward_and_reverse_attachment() {
        let graph = XrefGraph::build([(doc(100), refs(&[50]))]);

        assert_eq!(graph.references(&doc(100)).unwrap(), &[doc(50)]);
        assert_eq!(graph.referenced_by(&doc(50)).unwrap(), &[doc(100)]);
    }

    #[test]
    fn test_self_reference_eliminated() {
        let graph = XrefGraph::build([(doc(7), refs(&[7]))]);

        assert!(graph.references(&doc(7)).is_none());
        assert!(graph.referenced_by(&doc(7)).is_none());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_self_reference_among_others() {
        let graph = XrefGraph::build([(doc(7), refs(&[7, 3]))]);

        assert_eq!(graph.references(&doc(7)).unwrap(), &[doc(3)]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_numeric_not_lexicographic_ordering() {
        let graph = XrefGraph::build([(doc(1), refs(&[9, 10, 2]))]);

        let stored: Vec<_> = graph
            .references(&doc(1))
            .unwrap()
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(stored, ["RFC2", "RFC9", "RFC10"]);
    }

    #[test]
    fn test_reverse_lists_sorted_numerically() {
        let graph = XrefGraph::build([
            (doc(10), refs(&[5])),
            (doc(2), refs(&[5])),
            (doc(9), refs(&[5])),
        ]);

        let stored: Vec<_> = graph
            .referenced_by(&doc(5))
            .unwrap()
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(stored, ["RFC2", "RFC9", "RFC10"]);
    }

    #[test]
    fn test_order_independent_of_input_iteration() {
        let a = XrefGraph::build([(doc(1), refs(&[2, 3])), (doc(4), refs(&[2]))]);
        let b = XrefGraph::build([(doc(4), refs(&[2])), (doc(1), refs(&[3, 2]))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_transpose_consistency() {
        let graph = XrefGraph::build([
            (doc(1), refs(&[2, 3])),
            (doc(2), refs(&[3])),
            (doc(3), refs(&[1])),
        ]);

        // Every forward edge has its reverse counterpart.
        for (source, targets) in graph.iter_forward() {
            for target in targets {
                let incoming = graph.referenced_by(target).unwrap();
                assert!(incoming.contains(source), "{source} -> {target} dangling");
            }
        }
        // And vice versa - no orphaned reverse entries.
        for (target, sources) in graph.iter_reverse() {
            for source in sources {
                let outgoing = graph.references(source).unwrap();
                assert!(outgoing.contains(target), "{target} <- {source} dangling");
            }
        }
    }

    #[test]
    fn test_absent_documents_have_no_entry() {
        let graph = XrefGraph::build([(doc(1), refs(&[2]))]);

        // RFC1 is cited by nothing; RFC2 cites nothing; RFC99 is unknown.
        assert!(graph.referenced_by(&doc(1)).is_none());
        assert!(graph.references(&doc(2)).is_none());
        assert!(graph.references(&doc(99)).is_none());
        assert!(graph.referenced_by(&doc(99)).is_none());
    }

    #[test]
    fn test_citation_outside_corpus_still_recorded() {
        // RFC1 cites RFC9999 which is not among the ingested documents: the
        // forward edge still exists, and the reverse entry keys the target.
        let graph = XrefGraph::build([(doc(1), refs(&[9999]))]);

        assert_eq!(graph.references(&doc(1)).unwrap(), &[doc(9999)]);
        assert_eq!(graph.referenced_by(&doc(9999)).unwrap(), &[doc(1)]);
    }
}
