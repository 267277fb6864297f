//! Source text use-case service.

use crate::model::text::{Text, TextId, TextType};
use crate::repo::text_repo::TextRepository;
use crate::repo::RepoResult;
use log::info;

pub struct TextService<R: TextRepository> {
    repo: R,
}

impl<R: TextRepository> TextService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new active text.
    pub fn add_text(
        &self,
        kind: TextType,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> RepoResult<Text> {
        let text = Text::new(kind, title, author);
        self.repo.create_text(&text)?;
        info!(
            "event=text_create module=service status=ok text_id={} type={}",
            text.uuid,
            text.kind.as_str()
        );
        Ok(text)
    }

    pub fn get_text(&self, id: TextId) -> RepoResult<Option<Text>> {
        self.repo.get_text(id)
    }

    pub fn list_texts(&self, include_archived: bool) -> RepoResult<Vec<Text>> {
        self.repo.list_texts(include_archived)
    }

    /// Archives a text. Atoms citing it keep their reference.
    pub fn archive(&self, id: TextId) -> RepoResult<()> {
        self.repo.set_archived(id, true)
    }
}
