//! Index projection: rfc-index.xml into flat `IndexEntry` records.
//!
//! This is a mechanical field-by-field copy of each `<rfc-entry>` element -
//! no decision logic, just markup into records. Elements absent from an
//! entry project to `None`, never to empty collections: the distinction
//! survives all the way to the store's nullable columns.
//!
//! The index is authoritative, so an unparsable document or an entry with
//! no doc-id is a structural failure and fatal to the whole run.

use anyhow::{bail, Context, Result};
use roxmltree::Node;

use crate::types::{Author, DocDate, IndexEntry};

/// Project every `<rfc-entry>` of an rfc-index.xml document.
pub fn parse_index(xml: &str) -> Result<Vec<IndexEntry>> {
    let doc = roxmltree::Document::parse(xml).context("failed to parse rfc index XML")?;
    let root = doc.root_element();

    let mut entries = Vec::new();
    for node in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "rfc-entry")
    {
        let entry = project_entry(node)
            .with_context(|| format!("bad rfc-entry at position {}", entries.len() + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}

fn project_entry(entry: Node) -> Result<IndexEntry> {
    let Some(doc_id) = child_text(entry, "doc-id") else {
        bail!("rfc-entry without doc-id");
    };

    let author = entry
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "author")
        .map(|a| Author {
            name: child_text(a, "name"),
            title: child_text(a, "title"),
        })
        .collect();

    let date = match element_child(entry, "date") {
        Some(d) => DocDate {
            day: child_text(d, "day"),
            month: child_text(d, "month"),
            year: child_text(d, "year"),
        },
        None => DocDate::default(),
    };

    Ok(IndexEntry {
        doc_id,
        title: child_text(entry, "title"),
        author,
        date,
        format: text_list(entry, "format", "file-format"),
        page_count: child_text(entry, "page-count"),
        keywords: text_list(entry, "keywords", "kw"),
        is_also: text_list(entry, "is-also", "doc-id"),
        obsoletes: text_list(entry, "obsoletes", "doc-id"),
        obsoleted_by: text_list(entry, "obsoleted-by", "doc-id"),
        updates: text_list(entry, "updates", "doc-id"),
        updated_by: text_list(entry, "updated-by", "doc-id"),
        abstract_text: abstract_text(entry),
        see_also: text_list(entry, "see-also", "doc-id"),
        draft: child_text(entry, "draft"),
        current_status: child_text(entry, "current-status"),
        publication_status: child_text(entry, "publication-status"),
        stream: child_text(entry, "stream"),
        errata_url: child_text(entry, "errata-url"),
        area: child_text(entry, "area"),
        wg_acronym: child_text(entry, "wg_acronym"),
        doi: child_text(entry, "doi"),
    })
}

/// First child element with the given local name. Local-name matching keeps
/// the projection independent of the index's default namespace.
fn element_child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Text content of the first child element with the given name.
fn child_text(node: Node, name: &str) -> Option<String> {
    element_child(node, name)?.text().map(str::to_string)
}

/// List-valued field: the texts of every `item` element under the `wrapper`
/// child. `None` when the wrapper element itself is absent.
fn text_list(node: Node, wrapper: &str, item: &str) -> Option<Vec<String>> {
    let wrapper = element_child(node, wrapper)?;
    Some(
        wrapper
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == item)
            .filter_map(|n| n.text().map(str::to_string))
            .collect(),
    )
}

/// Abstract text: direct text of `<abstract>` when present, else the first
/// `<p>` child (the index wraps most abstracts in a paragraph element, so
/// the direct text is usually inter-element whitespace).
fn abstract_text(entry: Node) -> Option<String> {
    let node = element_child(entry, "abstract")?;
    match node.text() {
        Some(text) if !text.trim().is_empty() => Some(text.to_string()),
        _ => element_child(node, "p")?.text().map(str::to_string),
    }
}
