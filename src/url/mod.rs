//! URL validation, identity, and link resolution
//!
//! This module decides which URLs the crawler will touch:
//! - Seed acceptance (`is_valid_scheme`)
//! - Scheme-insensitive identity for deduplication (`normalized_key`)
//! - Same-host link resolution (`resolve_link`)

mod normalize;
mod resolve;

pub use normalize::{is_valid_scheme, normalized_key};
pub use resolve::resolve_link;
