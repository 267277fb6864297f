//! Related-content use-case service.
//!
//! # Responsibility
//! - Hold a validated [`SuggestConfig`] next to a candidate source.
//! - Emit one metadata-only `suggest` event per request.
//!
//! # Invariants
//! - Log lines carry counts and timings only, never note text.
//! - An atom is never suggested as related to itself.

use crate::config::{ConfigError, SuggestConfig};
use crate::model::atom::Atom;
use crate::suggest::ranker::{find_related, CandidateSource, RelatedContent, RelatedRequest};
use crate::suggest::scorer::ScoreInput;
use log::info;
use std::time::Instant;

pub struct SuggestionService<S: CandidateSource> {
    source: S,
    config: SuggestConfig,
}

impl<S: CandidateSource> SuggestionService<S> {
    /// Creates a service, rejecting configs that could yield negative scores.
    pub fn new(source: S, config: SuggestConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Related notes and texts for an unsaved draft.
    pub fn related_for_draft(&self, request: &RelatedRequest) -> RelatedContent {
        let started_at = Instant::now();
        let related = find_related(&self.source, request, &self.config);
        info!(
            "event=suggest module=service status=ok notes={} texts={} excluded={} duration_ms={}",
            related.notes.len(),
            related.texts.len(),
            request.exclude.is_some(),
            started_at.elapsed().as_millis()
        );
        related
    }

    /// Related content for a stored atom, excluding the atom itself.
    pub fn related_for_atom(&self, atom: &Atom, note_limit: Option<usize>) -> RelatedContent {
        let request = RelatedRequest {
            input: ScoreInput::from_atom(atom),
            exclude: Some(atom.uuid),
            note_limit,
        };
        self.related_for_draft(&request)
    }
}
