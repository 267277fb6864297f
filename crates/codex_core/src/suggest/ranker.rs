//! Candidate fetching and ranking of related notes and texts.
//!
//! # Responsibility
//! - Fetch eligible candidates through a [`CandidateSource`].
//! - Score each candidate independently, drop zero scores, sort, truncate.
//!
//! # Invariants
//! - Returned scores are strictly positive and non-increasing by position.
//! - Ties keep fetch order (stable sort).
//! - A failed fetch degrades to an empty pool for that collection only.
//! - The excluded atom, rejected atoms, hidden atoms and archived texts are
//!   never returned.

use crate::config::SuggestConfig;
use crate::db::ensure_schema_ready;
use crate::model::atom::{Atom, AtomId};
use crate::model::text::Text;
use crate::repo::atom_repo::{AtomListQuery, AtomRepository, SqliteAtomRepository};
use crate::repo::text_repo::{SqliteTextRepository, TextRepository};
use crate::repo::RepoResult;
use crate::suggest::scorer::{
    score_candidate, Candidate, MatchReason, PreparedInput, ScoreInput, ScoredMatch,
    ScoringWeights,
};
use log::{debug, warn};
use rusqlite::Connection;
use serde::Serialize;

/// Read-only provider of suggestion candidates.
pub trait CandidateSource {
    /// Atoms other students may see.
    fn fetch_notes(&self) -> RepoResult<Vec<Atom>>;
    /// Texts that are not archived.
    fn fetch_texts(&self) -> RepoResult<Vec<Text>>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for &S {
    fn fetch_notes(&self) -> RepoResult<Vec<Atom>> {
        (**self).fetch_notes()
    }

    fn fetch_texts(&self) -> RepoResult<Vec<Text>> {
        (**self).fetch_texts()
    }
}

/// Candidate source over the local SQLite store.
pub struct SqliteCandidateSource<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCandidateSource<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CandidateSource for SqliteCandidateSource<'_> {
    fn fetch_notes(&self) -> RepoResult<Vec<Atom>> {
        SqliteAtomRepository::try_new(self.conn)?.list_atoms(&AtomListQuery::visible())
    }

    fn fetch_texts(&self) -> RepoResult<Vec<Text>> {
        SqliteTextRepository::try_new(self.conn)?.list_texts(false)
    }
}

/// One ranked candidate. Produced per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<T> {
    pub candidate: T,
    pub score: f64,
    pub reasons: Vec<MatchReason>,
}

impl<T> Suggestion<T> {
    /// Reasons joined for display, e.g. `"exact title match, same source"`.
    pub fn reason(&self) -> String {
        self.reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Request for related content.
#[derive(Debug, Clone, Default)]
pub struct RelatedRequest {
    pub input: ScoreInput,
    /// Atom never suggested, typically the one being edited.
    pub exclude: Option<AtomId>,
    /// Overrides [`SuggestConfig::note_limit`].
    pub note_limit: Option<usize>,
}

impl RelatedRequest {
    pub fn new(input: ScoreInput) -> Self {
        Self {
            input,
            exclude: None,
            note_limit: None,
        }
    }
}

/// Ranked notes and texts for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedContent {
    pub notes: Vec<Suggestion<Atom>>,
    pub texts: Vec<Suggestion<Text>>,
}

/// Fetches candidates and ranks them against `request`.
pub fn find_related<S: CandidateSource>(
    source: &S,
    request: &RelatedRequest,
    config: &SuggestConfig,
) -> RelatedContent {
    let input = PreparedInput::new(&request.input);
    let notes = fetch_or_empty("notes", || source.fetch_notes());
    let texts = fetch_or_empty("texts", || source.fetch_texts());
    debug!(
        "event=suggest_candidates module=suggest status=ok notes={} texts={}",
        notes.len(),
        texts.len()
    );

    RelatedContent {
        notes: rank_notes(
            &input,
            notes,
            request.exclude,
            request.note_limit.unwrap_or(config.note_limit),
            &config.weights,
        ),
        texts: rank_texts(&input, texts, config.text_limit, &config.weights),
    }
}

/// Ranks note candidates, skipping `exclude` and atoms that are not visible.
pub fn rank_notes(
    input: &PreparedInput,
    notes: Vec<Atom>,
    exclude: Option<AtomId>,
    limit: usize,
    weights: &ScoringWeights,
) -> Vec<Suggestion<Atom>> {
    let eligible = notes
        .into_iter()
        .filter(|atom| atom.is_visible() && Some(atom.uuid) != exclude);
    rank(eligible, limit, |atom| {
        score_candidate(input, Candidate::Note(atom), weights)
    })
}

/// Ranks text candidates, skipping archived texts.
pub fn rank_texts(
    input: &PreparedInput,
    texts: Vec<Text>,
    limit: usize,
    weights: &ScoringWeights,
) -> Vec<Suggestion<Text>> {
    let eligible = texts.into_iter().filter(|text| !text.is_archived);
    rank(eligible, limit, |text| {
        score_candidate(input, Candidate::Text(text), weights)
    })
}

fn rank<T>(
    candidates: impl Iterator<Item = T>,
    limit: usize,
    score: impl Fn(&T) -> ScoredMatch,
) -> Vec<Suggestion<T>> {
    let mut ranked = candidates
        .filter_map(|candidate| {
            let scored = score(&candidate);
            (scored.score > 0.0).then_some(Suggestion {
                candidate,
                score: scored.score,
                reasons: scored.reasons,
            })
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

fn fetch_or_empty<T>(collection: &'static str, fetch: impl FnOnce() -> RepoResult<Vec<T>>) -> Vec<T> {
    match fetch() {
        Ok(items) => items,
        Err(err) => {
            warn!(
                "event=suggest_fetch module=suggest status=error collection={} error={}",
                collection, err
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{find_related, CandidateSource, RelatedRequest};
    use crate::config::SuggestConfig;
    use crate::model::atom::{Atom, AtomType};
    use crate::model::text::{Text, TextType};
    use crate::repo::{RepoError, RepoResult};
    use crate::suggest::scorer::ScoreInput;

    struct FailingNotes {
        texts: Vec<Text>,
    }

    impl CandidateSource for FailingNotes {
        fn fetch_notes(&self) -> RepoResult<Vec<Atom>> {
            Err(RepoError::InvalidData("backend unavailable".to_string()))
        }

        fn fetch_texts(&self) -> RepoResult<Vec<Text>> {
            Ok(self.texts.clone())
        }
    }

    #[test]
    fn failed_note_fetch_keeps_text_suggestions() {
        let source = FailingNotes {
            texts: vec![Text::new(TextType::Book, "Simulacra and Simulation", "Baudrillard")],
        };
        let request = RelatedRequest::new(ScoreInput::new("Simulacra and Simulation", ""));

        let related = find_related(&source, &request, &SuggestConfig::default());
        assert!(related.notes.is_empty());
        assert_eq!(related.texts.len(), 1);
    }

    #[test]
    fn suggestion_reason_joins_reasons() {
        struct OneNote(Atom);
        impl CandidateSource for OneNote {
            fn fetch_notes(&self) -> RepoResult<Vec<Atom>> {
                Ok(vec![self.0.clone()])
            }
            fn fetch_texts(&self) -> RepoResult<Vec<Text>> {
                Ok(Vec::new())
            }
        }

        let source = OneNote(Atom::new(AtomType::Idea, "Memory palace", ""));
        let mut input = ScoreInput::new("Memory palace", "");
        input.kind = Some(AtomType::Idea);
        let related = find_related(&source, &RelatedRequest::new(input), &SuggestConfig::default());

        assert_eq!(
            related.notes[0].reason(),
            "exact title match, 2 shared title words, same category"
        );
    }
}
