//! Canonical document identifiers.
//!
//! Every data source in the pipeline spells document identifiers its own way:
//! archive member names are lowercase (`rfc1234.txt`), the index zero-pads
//! (`RFC0005`), and URLs embed whatever the citing author typed. `DocId` is
//! the single join key that makes these sources meet: an uppercase prefix
//! plus the number held as an integer, so the padded and unpadded spellings
//! of the same document collapse to one value by construction.
//!
//! Canonicalization is idempotent and total over matching inputs: parsing a
//! canonical rendering reproduces the same `DocId`, and two identifiers
//! compare equal iff they denote the same document.

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier patterns, cached as statics to avoid recompilation.
mod patterns {
    use super::*;

    /// Exact identifier token: alphabetic prefix immediately followed by
    /// a digit run, e.g. `RFC0005`, `rfc793`, `BCP0090`.
    pub static TOKEN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^([A-Za-z]+)0*([0-9]+)$").expect("Invalid identifier token regex")
    });

    /// First embedded RFC token in arbitrary text (case-insensitive).
    /// This is the number-extraction scan applied to narrow-matched URLs.
    pub static RFC_EMBEDDED: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)rfc0*([0-9]+)").expect("Invalid embedded RFC regex")
    });
}

/// Canonical document identifier: uppercase prefix + number.
///
/// The number is stored as `u32`, never as the source digit string, so
/// leading zeros cannot survive past a constructor. The rendered form is
/// always the minimal-digit spelling (`RFC1`, never `RFC0001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocId {
    prefix: String,
    number: u32,
}

impl DocId {
    /// An RFC identifier from its number.
    pub fn rfc(number: u32) -> Self {
        Self {
            prefix: "RFC".to_string(),
            number,
        }
    }

    /// Parse an exact identifier token: case-insensitive alphabetic prefix
    /// immediately followed by one or more decimal digits.
    ///
    /// Returns `None` for anything else - callers are expected to have
    /// confirmed the token shape already (archive member filter, index
    /// doc-id fields). `RFC0000` parses to `RFC0`: the digit run keeps at
    /// least one digit.
    pub fn parse(token: &str) -> Option<Self> {
        let caps = patterns::TOKEN.captures(token)?;
        let number = caps[2].parse().ok()?;
        Some(Self {
            prefix: caps[1].to_ascii_uppercase(),
            number,
        })
    }

    /// Find the first embedded RFC token in arbitrary text.
    ///
    /// This is the canonicalizer's number-extraction pass: it runs over every
    /// narrow-matched reference URL regardless of which path shape matched.
    /// URLs addressing non-RFC items (bcp, std, errata, ien) carry no RFC
    /// token and yield `None` - they contribute no edge.
    pub fn find_rfc(text: &str) -> Option<Self> {
        let caps = patterns::RFC_EMBEDDED.captures(text)?;
        let number = caps[1].parse().ok()?;
        Some(Self::rfc(number))
    }

    /// The numeric suffix, the sort key for reference lists.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.number)
    }
}

/// Ordering by numeric suffix, prefix as tiebreak.
///
/// Reference lists sort by the number's value: `RFC2` before `RFC9` before
/// `RFC10`, never the lexicographic `RFC10, RFC2, RFC9`.
impl Ord for DocId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| self.prefix.cmp(&other.prefix))
    }
}

impl PartialOrd for DocId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Serialized as the canonical string form, so identifiers are readable in
/// the JSON interchange artifact and usable as map keys.
impl Serialize for DocId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DocId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DocId::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid document id: {s:?}")))
    }
}

/// Strip zero-padding from an identifier token, leaving non-matching input
/// untouched.
///
/// Used when reconciling index records: the index spells cross-reference
/// fields zero-padded (`RFC0005`, `BCP0090`) while the graph keys are
/// minimal-digit. Applying the same normalization on both sides makes the
/// join line up.
pub fn normalize_token(token: &str) -> String {
    match DocId::parse(token) {
        Some(id) => id.to_string(),
        None => token.to_string(),
    }
}
