//! Pipeline orchestration: archive to knowledge base.
//!
//! ```text
//! RFC-all.zip → segment → extract → canonicalize ┐   (parallel map,
//!                                                │    one doc per task)
//!                                     ReferencesMap   (JSON artifact)
//!                                                │
//!                                           XrefGraph (single reduce)
//! rfc-index.xml → project ──────────────────────┤
//!                                           reconcile → rfc_entries
//! ```
//!
//! Stages up to the references map have no cross-document dependency, so
//! they run as a rayon map over documents. Graph construction is a single
//! fold over the collected per-document results; reconciliation is a pure
//! per-record pass over the then-immutable graph. Nothing in between holds
//! shared mutable state.
//!
//! The references map is the cacheable boundary: `extract` writes it as
//! JSON, and `build` can start from that artifact instead of re-reading the
//! archive.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::archive::read_corpus;
use crate::extract::{document_reference_urls, targets_from_urls};
use crate::graph::XrefGraph;
use crate::index::parse_index;
use crate::merge::reconcile;
use crate::store::EntryStore;
use crate::types::{IndexEntry, ReferencesMap};

/// Counters reported after a build run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    /// Documents read from the corpus archive (or references artifact).
    pub documents: usize,
    /// Raw reference URLs across all documents.
    pub reference_urls: usize,
    /// Edges in the cross-reference graph.
    pub edges: usize,
    /// Index entries projected.
    pub index_entries: usize,
    /// Records persisted.
    pub records: usize,
}

/// Stage 1-3: corpus archive into the per-document references map.
///
/// Segmentation, extraction and canonicalization are embarrassingly
/// parallel; each rayon task owns one document's text and produces its URL
/// set independently.
pub fn extract_references(archive: &Path) -> Result<ReferencesMap> {
    info!(archive = %archive.display(), "reading corpus archive");
    let docs = read_corpus(archive)?;
    info!(documents = docs.len(), "corpus loaded");

    let map: ReferencesMap = docs
        .par_iter()
        .map(|(id, body)| {
            let urls = document_reference_urls(body);
            debug!(doc = %id, urls = urls.len(), "references extracted");
            (id.clone(), urls)
        })
        .collect();

    info!(
        documents = map.len(),
        urls = map.values().map(|u| u.len()).sum::<usize>(),
        "reference extraction finished"
    );
    Ok(map)
}

/// Stage 4: fold per-document URL sets into the cross-reference graph.
///
/// URL-to-target collapse happens here so the graph sees true canonical
/// sets - two URL forms for the same target fold to one edge before any
/// list is appended.
pub fn build_graph(map: &ReferencesMap) -> XrefGraph {
    let graph = XrefGraph::build(
        map.iter()
            .map(|(doc, urls)| (doc.clone(), targets_from_urls(urls))),
    );
    info!(
        citing = graph.citing_count(),
        cited = graph.cited_count(),
        edges = graph.edge_count(),
        "cross-reference graph built"
    );
    graph
}

/// Write the references map as the JSON interchange artifact.
pub fn write_references(map: &ReferencesMap, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(map).context("failed to encode references map")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write references map: {}", path.display()))?;
    info!(path = %path.display(), documents = map.len(), "references map written");
    Ok(())
}

/// Read a references map previously written by [`write_references`].
pub fn read_references(path: &Path) -> Result<ReferencesMap> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read references map: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("references map is not valid JSON: {}", path.display()))
}

/// Project the document index from disk.
///
/// Accepts either the raw rfc-index.xml or a previously projected JSON
/// artifact, picked by file extension.
pub fn load_index(path: &Path) -> Result<Vec<IndexEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read index: {}", path.display()))?;

    let entries = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("index is not valid JSON: {}", path.display()))?
    } else {
        parse_index(&content)
            .with_context(|| format!("failed to project index: {}", path.display()))?
    };
    info!(entries = entries.len(), "index projected");
    Ok(entries)
}

/// Where `build` gets its reference data from.
#[derive(Debug, Clone)]
pub enum ReferenceSource {
    /// Extract from the corpus archive.
    Archive(PathBuf),
    /// Reuse a previously extracted references map.
    Artifact(PathBuf),
    /// No reference data: persist the index projection alone, with NULL
    /// reference columns.
    None,
}

/// Build options for the full pipeline run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub references: ReferenceSource,
    pub index: PathBuf,
    pub db: PathBuf,
    /// Also dump the extracted references map to this path.
    pub dump_references: Option<PathBuf>,
}

/// Run the full pipeline: references + index → reconciled records → store.
pub fn build(opts: &BuildOptions) -> Result<PipelineStats> {
    let map = match &opts.references {
        ReferenceSource::Archive(path) => extract_references(path)?,
        ReferenceSource::Artifact(path) => read_references(path)?,
        ReferenceSource::None => ReferencesMap::new(),
    };

    if let Some(dump) = &opts.dump_references {
        if matches!(opts.references, ReferenceSource::None) {
            bail!("nothing to dump: no reference source configured");
        }
        write_references(&map, dump)?;
    }

    let graph = build_graph(&map);
    let entries = load_index(&opts.index)?;
    let records = reconcile(&entries, &graph);

    let mut store = EntryStore::open(&opts.db)?;
    let inserted = store.insert_records(&records)?;
    info!(db = %opts.db.display(), records = inserted, "knowledge base built");

    Ok(PipelineStats {
        documents: map.len(),
        reference_urls: map.values().map(|u| u.len()).sum(),
        edges: graph.edge_count(),
        index_entries: entries.len(),
        records: inserted,
    })
}
