//! Domain model for atoms and the source texts they cite.
//!
//! # Responsibility
//! - Define canonical data structures used by storage and suggestion logic.
//!
//! # Invariants
//! - Every domain object is identified by a stable, non-nil UUID.
//! - Visibility (moderation + hidden flag) is decided here, not in callers.

pub mod atom;
pub mod text;
