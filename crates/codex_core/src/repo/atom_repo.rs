//! Atom repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `atoms` storage.
//! - Serve visibility-filtered listings for suggestion candidate fetches.
//!
//! # Invariants
//! - Write paths call `Atom::validate()` before SQL mutations.
//! - Listings are ordered by insertion (`created_at ASC, rowid ASC`) so that
//!   repeated fetches over an unchanged table are identical.

use crate::db::ensure_schema_ready;
use crate::model::atom::{Atom, AtomId, AtomType, ModerationStatus};
use crate::model::text::TextId;
use crate::repo::{bool_to_int, parse_bool_column, parse_uuid_column, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ATOM_SELECT_SQL: &str = "SELECT
    uuid,
    type,
    title,
    body,
    text_uuid,
    status,
    is_hidden
FROM atoms";

/// Query options for listing atoms.
#[derive(Debug, Clone, Default)]
pub struct AtomListQuery {
    pub kind: Option<AtomType>,
    pub text_uuid: Option<TextId>,
    /// Only atoms that are neither rejected nor hidden.
    pub visible_only: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl AtomListQuery {
    /// Query used by suggestion candidate fetches.
    pub fn visible() -> Self {
        Self {
            visible_only: true,
            ..Self::default()
        }
    }
}

/// Repository interface for atom operations.
pub trait AtomRepository {
    fn create_atom(&self, atom: &Atom) -> RepoResult<AtomId>;
    /// Replaces author-owned fields (type, title, body, cited text).
    fn update_atom(&self, atom: &Atom) -> RepoResult<()>;
    fn get_atom(&self, id: AtomId) -> RepoResult<Option<Atom>>;
    fn list_atoms(&self, query: &AtomListQuery) -> RepoResult<Vec<Atom>>;
    fn set_status(&self, id: AtomId, status: ModerationStatus) -> RepoResult<()>;
    fn set_hidden(&self, id: AtomId, hidden: bool) -> RepoResult<()>;
}

/// SQLite-backed atom repository.
pub struct SqliteAtomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAtomRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AtomRepository for SqliteAtomRepository<'_> {
    fn create_atom(&self, atom: &Atom) -> RepoResult<AtomId> {
        atom.validate()?;

        self.conn.execute(
            "INSERT INTO atoms (
                uuid,
                type,
                title,
                body,
                text_uuid,
                status,
                is_hidden
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                atom.uuid.to_string(),
                atom.kind.as_str(),
                atom.title.as_str(),
                atom.body.as_str(),
                atom.text_uuid.map(|id| id.to_string()),
                atom.status.as_str(),
                bool_to_int(atom.is_hidden),
            ],
        )?;

        Ok(atom.uuid)
    }

    fn update_atom(&self, atom: &Atom) -> RepoResult<()> {
        atom.validate()?;

        let changed = self.conn.execute(
            "UPDATE atoms
             SET
                type = ?1,
                title = ?2,
                body = ?3,
                text_uuid = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                atom.kind.as_str(),
                atom.title.as_str(),
                atom.body.as_str(),
                atom.text_uuid.map(|id| id.to_string()),
                atom.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(atom.uuid));
        }

        Ok(())
    }

    fn get_atom(&self, id: AtomId) -> RepoResult<Option<Atom>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ATOM_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_atom_row(row)?));
        }

        Ok(None)
    }

    fn list_atoms(&self, query: &AtomListQuery) -> RepoResult<Vec<Atom>> {
        let mut sql = format!("{ATOM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if query.visible_only {
            sql.push_str(" AND is_hidden = 0 AND status <> 'rejected'");
        }

        if let Some(kind) = query.kind {
            sql.push_str(" AND type = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }

        if let Some(text_uuid) = query.text_uuid {
            sql.push_str(" AND text_uuid = ?");
            bind_values.push(Value::Text(text_uuid.to_string()));
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut atoms = Vec::new();

        while let Some(row) = rows.next()? {
            atoms.push(parse_atom_row(row)?);
        }

        Ok(atoms)
    }

    fn set_status(&self, id: AtomId, status: ModerationStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE atoms
             SET
                status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![status.as_str(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn set_hidden(&self, id: AtomId, hidden: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE atoms
             SET
                is_hidden = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![bool_to_int(hidden), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_atom_row(row: &Row<'_>) -> RepoResult<Atom> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "atoms.uuid")?;

    let type_text: String = row.get("type")?;
    let kind = AtomType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid atom type `{type_text}` in atoms.type"))
    })?;

    let text_uuid = match row.get::<_, Option<String>>("text_uuid")? {
        Some(value) => Some(parse_uuid_column(&value, "atoms.text_uuid")?),
        None => None,
    };

    let status_text: String = row.get("status")?;
    let status = ModerationStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in atoms.status"))
    })?;

    let atom = Atom {
        uuid,
        kind,
        title: row.get("title")?,
        body: row.get("body")?,
        text_uuid,
        status,
        is_hidden: parse_bool_column(row.get("is_hidden")?, "atoms.is_hidden")?,
    };
    atom.validate()?;
    Ok(atom)
}
