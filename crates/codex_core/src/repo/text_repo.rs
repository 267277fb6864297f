//! Source text repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Texts are archived, never deleted, so cited `text_uuid`s stay resolvable.
//! - Listing order matches atoms: `created_at ASC, rowid ASC`.

use crate::db::ensure_schema_ready;
use crate::model::text::{Text, TextId, TextType};
use crate::repo::{bool_to_int, parse_bool_column, parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TEXT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    author,
    type,
    is_archived
FROM texts";

/// Repository interface for source texts.
pub trait TextRepository {
    fn create_text(&self, text: &Text) -> RepoResult<TextId>;
    fn get_text(&self, id: TextId) -> RepoResult<Option<Text>>;
    fn list_texts(&self, include_archived: bool) -> RepoResult<Vec<Text>>;
    fn set_archived(&self, id: TextId, archived: bool) -> RepoResult<()>;
}

/// SQLite-backed text repository.
pub struct SqliteTextRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTextRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TextRepository for SqliteTextRepository<'_> {
    fn create_text(&self, text: &Text) -> RepoResult<TextId> {
        text.validate()?;

        self.conn.execute(
            "INSERT INTO texts (uuid, title, author, type, is_archived)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                text.uuid.to_string(),
                text.title.as_str(),
                text.author.as_str(),
                text.kind.as_str(),
                bool_to_int(text.is_archived),
            ],
        )?;

        Ok(text.uuid)
    }

    fn get_text(&self, id: TextId) -> RepoResult<Option<Text>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEXT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_text_row(row)?));
        }
        Ok(None)
    }

    fn list_texts(&self, include_archived: bool) -> RepoResult<Vec<Text>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TEXT_SELECT_SQL}
             WHERE (?1 = 1 OR is_archived = 0)
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([bool_to_int(include_archived)])?;
        let mut texts = Vec::new();
        while let Some(row) = rows.next()? {
            texts.push(parse_text_row(row)?);
        }
        Ok(texts)
    }

    fn set_archived(&self, id: TextId, archived: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE texts
             SET
                is_archived = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![bool_to_int(archived), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_text_row(row: &Row<'_>) -> RepoResult<Text> {
    let uuid_text: String = row.get("uuid")?;
    let type_text: String = row.get("type")?;
    let kind = TextType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid text type `{type_text}` in texts.type"))
    })?;

    let text = Text {
        uuid: parse_uuid_column(&uuid_text, "texts.uuid")?,
        title: row.get("title")?,
        author: row.get("author")?,
        kind,
        is_archived: parse_bool_column(row.get("is_archived")?, "texts.is_archived")?,
    };
    text.validate()?;
    Ok(text)
}
