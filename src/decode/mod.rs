//! Response decoding for the Trends endpoints
//!
//! Provider bodies arrive guard-prefixed and, for the batch RPC, JSON-encoded
//! twice. Records are positional (or loosely keyed) and decoded best-effort:
//! a malformed record is dropped, a malformed container is a parse error.

pub mod autocomplete;
pub mod envelope;
pub mod explore;
pub mod region;
pub mod related;
pub mod slot;
pub mod trending;

pub use autocomplete::parse_autocomplete;
pub use envelope::{read_document, strip_guard, unwrap_payload};
pub use explore::parse_explore;
pub use region::parse_interest_by_region;
pub use related::{merge_related, parse_related_queries, parse_related_topics};
pub use trending::parse_trending;
