//! Related-content suggestion engine.
//!
//! # Responsibility
//! - Extract keywords from free text (`keywords`).
//! - Score one candidate against a draft (`scorer`).
//! - Fetch, rank and truncate candidate pools (`ranker`).
//!
//! # Invariants
//! - Suggestion code never mutates atoms or texts.
//! - Results are computed per request and never persisted.

pub mod keywords;
pub mod ranker;
pub mod scorer;
