//! Corpus archive reader: the `RFC-all.zip` snapshot into memory.
//!
//! The archive mixes RFC text bodies with indexes, errata and other
//! editorial files, so members are selected by the strict filename shape
//! `rfcNNNN.txt` - a bare `.txt` suffix check would admit members that are
//! not RFC documents. Document identity derives from the member filename,
//! not from anything inside the body.
//!
//! A handful of old RFCs carry stray control bytes and other non-UTF-8
//! sequences; bodies are decoded best-effort (lossy) so one odd byte never
//! aborts the run. A member that cannot be *read* at all is a structural
//! failure and fatal, surfaced with the member name.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use zip::ZipArchive;

use crate::ident::DocId;

/// RFC body members only: `rfc793.txt`, `RFC0959.TXT`.
static MEMBER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:rfc|RFC)([0-9]+)\.(?:txt|TXT)$").expect("Invalid archive member regex")
});

/// Read every RFC text body out of a corpus archive.
///
/// Returns `(id, body)` pairs sorted by identifier, so downstream stages see
/// a deterministic document order regardless of archive layout.
pub fn read_corpus(path: &Path) -> Result<Vec<(DocId, String)>> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read corpus archive: {}", path.display()))?;
    read_corpus_bytes(&bytes)
        .with_context(|| format!("failed to open corpus archive: {}", path.display()))
}

/// Read RFC text bodies from in-memory archive bytes.
pub fn read_corpus_bytes(bytes: &[u8]) -> Result<Vec<(DocId, String)>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).context("not a readable zip archive")?;

    let mut docs = Vec::new();
    for i in 0..archive.len() {
        let mut member = archive
            .by_index(i)
            .with_context(|| format!("failed to open archive member #{i}"))?;
        if member.is_dir() {
            continue;
        }

        let name = member.name().to_string();
        let Some(id) = doc_id_from_member_name(&name) else {
            debug!(member = %name, "skipping non-document member");
            continue;
        };

        let mut raw = Vec::with_capacity(member.size() as usize);
        member
            .read_to_end(&mut raw)
            .with_context(|| format!("failed to read archive member: {name}"))?;

        // Lossy decode: stray control bytes in old documents must not be
        // fatal for segmentation.
        docs.push((id, String::from_utf8_lossy(&raw).into_owned()));
    }

    docs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(docs)
}

/// Canonical identifier from an archive member filename, `None` for members
/// that are not RFC text bodies.
fn doc_id_from_member_name(name: &str) -> Option<DocId> {
    let caps = MEMBER_NAME.captures(name)?;
    let number = caps[1].parse().ok()?;
    Some(DocId::rfc(number))
}
