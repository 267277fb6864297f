//! Core domain logic for Codex Machina.
//!
//! Atoms and source texts live in a local SQLite store; the `suggest`
//! module ranks them as related content for a draft.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod suggest;

pub use config::{ConfigError, SuggestConfig};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::atom::{Atom, AtomId, AtomType, AtomValidationError, ModerationStatus};
pub use model::text::{Text, TextId, TextType, TextValidationError};
pub use repo::atom_repo::{AtomListQuery, AtomRepository, SqliteAtomRepository};
pub use repo::text_repo::{SqliteTextRepository, TextRepository};
pub use repo::{RepoError, RepoResult};
pub use service::atom_service::{AtomService, CreateAtomRequest};
pub use service::suggestion_service::SuggestionService;
pub use service::text_service::TextService;
pub use suggest::keywords::extract_keywords;
pub use suggest::ranker::{
    find_related, CandidateSource, RelatedContent, RelatedRequest, SqliteCandidateSource,
    Suggestion,
};
pub use suggest::scorer::{
    score_candidate, Candidate, MatchReason, PreparedInput, ScoreInput, ScoredMatch,
    ScoringWeights,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
