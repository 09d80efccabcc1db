//! Reference extraction: layered URL pattern matching over paragraphs.
//!
//! Extraction runs in two layers with opposite precision/recall trade-offs:
//!
//! 1. A coarse pass finds anything shaped like a web address (scheme plus a
//!    non-whitespace run). Low false-negative rate - it even catches URLs
//!    that were wrapped mid-token and re-joined by the segmenter - but it
//!    drags in every unrelated administrative and external link in the prose.
//! 2. Two narrow patterns, applied independently to each coarse candidate,
//!    accept only the known reference-hosting path shapes: the rfc-editor
//!    document roots and the ietf mirror paths. Only in-corpus reference
//!    shapes matter to the graph, so trading recall for precision here is
//!    free.
//!
//! The narrow-matched substring (not the whole coarse candidate) enters the
//! result set; set semantics collapse duplicates, including a candidate that
//! matches both narrow patterns. A paragraph with zero matches contributes
//! nothing - that is the common case, not an error.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ident::DocId;
use crate::segment::paragraphs;

/// Extraction patterns, cached as statics to avoid recompilation.
mod patterns {
    use super::*;

    /// Coarse pass: any scheme + non-whitespace run.
    pub static COARSE_URL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"https?://\S+").expect("Invalid coarse URL regex"));

    /// Narrow pass: rfc-editor document roots.
    ///
    /// Matches e.g.
    ///   http://rfc-editor.org/info/rfc6514
    ///   http://www.rfc-editor.org/ien/ien23.txt
    ///   http://www.rfc-editor.org/info/bcp90
    ///   https://www.rfc-editor.org/errata/eid7960
    ///   https://www.rfc-editor.org/rfc/rfc5234
    pub static EDITOR_HOST: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"https?://(www\.)?rfc-editor\.org/(rfc|info|errata|ien|)/(rfc|bcp|std|sstd|eid|ien|)?[0-9]+(\.txt)?",
        )
        .expect("Invalid rfc-editor host regex")
    });

    /// Narrow pass: ietf mirror paths.
    ///
    /// Matches e.g.
    ///   http://ietf.org/rfc/rfc7035.txt
    ///   http://tools.ietf.org/html/rfc5965
    ///   http://www.ietf.org/rfc/ien/ien116.txt
    pub static IETF_HOST: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"https?://((www|tools)\.)?ietf\.org/(rfc|html)/(rfc|ien/ien)[0-9]+(\.txt)?")
            .expect("Invalid ietf host regex")
    });
}

/// Extract the raw reference URLs embedded in one paragraph.
///
/// Coarse candidates that fail both narrow patterns are silently dropped -
/// most web links in RFC prose are unrelated external links.
pub fn reference_urls(paragraph: &str) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();

    for candidate in patterns::COARSE_URL.find_iter(paragraph) {
        let candidate = candidate.as_str();

        if let Some(matched) = patterns::EDITOR_HOST.find(candidate) {
            urls.insert(matched.as_str().to_string());
        }
        if let Some(matched) = patterns::IETF_HOST.find(candidate) {
            urls.insert(matched.as_str().to_string());
        }
    }

    urls
}

/// Extract the raw reference URLs across a whole document body.
///
/// Runs the segmenter and unions the per-paragraph sets. This is the
/// per-document value of the references-map interchange artifact.
pub fn document_reference_urls(body: &str) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();
    for paragraph in paragraphs(body) {
        urls.extend(reference_urls(&paragraph));
    }
    urls
}

/// Collapse raw reference URLs to canonical target identifiers.
///
/// The number-extraction scan runs on every surviving URL regardless of
/// which narrow pattern matched it. Distinct URL forms addressing the same
/// document fold into one target; URLs with no RFC token (bcp, std, errata,
/// ien items) yield nothing.
pub fn targets_from_urls<'a, I>(urls: I) -> BTreeSet<DocId>
where
    I: IntoIterator<Item = &'a String>,
{
    urls.into_iter()
        .filter_map(|url| DocId::find_rfc(url))
        .collect()
}

/// Canonical target identifiers referenced by one paragraph.
pub fn reference_targets(paragraph: &str) -> BTreeSet<DocId> {
    targets_from_urls(&reference_urls(paragraph))
}
