//! Atom use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for authoring and moderating atoms.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::atom::{Atom, AtomId, AtomType, ModerationStatus};
use crate::model::text::TextId;
use crate::repo::atom_repo::{AtomListQuery, AtomRepository};
use crate::repo::{RepoError, RepoResult};
use log::info;

/// Request model for authoring a new atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAtomRequest {
    pub kind: AtomType,
    pub title: String,
    pub body: String,
    pub text_uuid: Option<TextId>,
}

/// Use-case service wrapper for atom operations.
pub struct AtomService<R: AtomRepository> {
    repo: R,
}

impl<R: AtomRepository> AtomService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a pending atom and returns the stored record.
    pub fn create_atom(&self, request: &CreateAtomRequest) -> RepoResult<Atom> {
        let mut atom = Atom::new(request.kind, request.title.trim(), request.body.clone());
        atom.text_uuid = request.text_uuid;
        self.repo.create_atom(&atom)?;
        info!(
            "event=atom_create module=service status=ok atom_id={} type={}",
            atom.uuid,
            atom.kind.as_str()
        );
        Ok(atom)
    }

    /// Replaces title and body of an existing atom.
    ///
    /// Returns `RepoError::NotFound` when the atom does not exist.
    pub fn update_content(
        &self,
        id: AtomId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> RepoResult<Atom> {
        let mut atom = self.repo.get_atom(id)?.ok_or(RepoError::NotFound(id))?;
        atom.title = title.into();
        atom.body = body.into();
        self.repo.update_atom(&atom)?;
        Ok(atom)
    }

    pub fn get_atom(&self, id: AtomId) -> RepoResult<Option<Atom>> {
        self.repo.get_atom(id)
    }

    pub fn list_atoms(&self, query: &AtomListQuery) -> RepoResult<Vec<Atom>> {
        self.repo.list_atoms(query)
    }

    /// Records a moderation decision.
    pub fn moderate(&self, id: AtomId, status: ModerationStatus) -> RepoResult<()> {
        self.repo.set_status(id, status)?;
        info!(
            "event=atom_moderate module=service status=ok atom_id={} moderation={}",
            id,
            status.as_str()
        );
        Ok(())
    }

    pub fn hide(&self, id: AtomId) -> RepoResult<()> {
        self.repo.set_hidden(id, true)
    }

    pub fn unhide(&self, id: AtomId) -> RepoResult<()> {
        self.repo.set_hidden(id, false)
    }
}
