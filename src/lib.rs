//! rfcmap - RFC corpus cross-reference cartography.
//!
//! Builds a queryable knowledge base from two independently produced
//! snapshots of the RFC corpus: the full-text archive (`RFC-all.zip`) and
//! the authoritative index (`rfc-index.xml`).
//!
//! # Architecture
//!
//! ```text
//! Archive → Segmenter → Reference Locator → Canonicalizer → Graph → Merge
//!    ↓          ↓              ↓                 ↓            ↓       ↓
//!   zip     paragraph      coarse+narrow       DocId      forward/  SQLite
//!  member   re-wrapping     URL patterns     (RFC + n)    reverse   rows
//! ```
//!
//! The hard part is not any single stage but making the two datasets agree:
//! document bodies are raggedly line-wrapped (URLs break mid-token), cite
//! each other through half a dozen URL shapes, and spell identifiers
//! differently than the index does (`rfc50` vs `RFC0050`). Everything
//! funnels through one canonical identifier so the derived graph joins the
//! index records exactly.

pub mod archive;
pub mod extract;
pub mod graph;
pub mod ident;
pub mod index;
pub mod merge;
pub mod pipeline;
pub mod segment;
pub mod store;
pub mod types;

// Re-export core types
pub use graph::XrefGraph;
pub use ident::DocId;
pub use store::EntryStore;
pub use types::{Author, DocDate, IndexEntry, ReferencesMap, RfcRecord};
