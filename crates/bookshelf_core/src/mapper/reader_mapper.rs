//! Mapper for the `reader` table.

use super::{log_failure, not_found, DomainObject, MapperError, MapperKind, MapperResult};
use crate::model::user::{Reader, SharedReader, UserId};
use log::debug;
use rusqlite::{params, Connection, Row};

const TABLE: &str = "reader";

impl DomainObject for Reader {
    fn mapper_kind(&self) -> MapperKind {
        MapperKind::Reader
    }
}

pub struct ReaderMapper<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ReaderMapper<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn table_name(&self) -> &'static str {
        TABLE
    }

    /// Loads every reader, ordered by id.
    pub fn all(&self) -> MapperResult<Vec<SharedReader>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name FROM reader ORDER BY id;")?;
        let mut rows = stmt.query([])?;
        let mut readers = Vec::new();
        while let Some(row) = rows.next()? {
            readers.push(parse_reader_row(row)?.into_shared());
        }
        Ok(readers)
    }

    /// Loads one reader, keeping the stored id.
    ///
    /// # Errors
    /// - `RecordNotFound` when no row has this id.
    pub fn find_by_id(&self, id: UserId) -> MapperResult<SharedReader> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name FROM reader WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(parse_reader_row(row)?.into_shared());
        }
        Err(not_found("id", id))
    }

    /// Inserts a new row and returns its id. `reader.id` is left as is.
    pub fn insert(&self, reader: &Reader) -> MapperResult<i64> {
        self.conn
            .execute(
                "INSERT INTO reader (first_name, last_name) VALUES (?1, ?2);",
                params![reader.first_name, reader.last_name],
            )
            .map_err(|err| {
                log_failure("insert", TABLE, &err);
                MapperError::Commit(err)
            })?;

        let row_id = self.conn.last_insert_rowid();
        debug!("event=mapper_insert module=mapper status=ok table={TABLE} row_id={row_id}");
        Ok(row_id)
    }

    /// Replaces first and last name of the row keyed by `reader.id`.
    pub fn update(&self, reader: &Reader) -> MapperResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE reader SET first_name = ?1, last_name = ?2 WHERE id = ?3;",
                params![reader.first_name, reader.last_name, reader.id],
            )
            .map_err(|err| {
                log_failure("update", TABLE, &err);
                MapperError::Update(err)
            })?;

        if changed == 0 {
            return Err(not_found("id", reader.id));
        }
        debug!("event=mapper_update module=mapper status=ok table={TABLE} id={}", reader.id);
        Ok(())
    }

    pub fn delete(&self, reader: &Reader) -> MapperResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reader WHERE id = ?1;", [reader.id])
            .map_err(|err| {
                log_failure("delete", TABLE, &err);
                MapperError::Delete(err)
            })?;

        if changed == 0 {
            return Err(not_found("id", reader.id));
        }
        debug!("event=mapper_delete module=mapper status=ok table={TABLE} id={}", reader.id);
        Ok(())
    }
}

fn parse_reader_row(row: &Row<'_>) -> rusqlite::Result<Reader> {
    Ok(Reader::new(
        row.get::<_, UserId>("id")?,
        row.get::<_, String>("first_name")?,
        row.get::<_, String>("last_name")?,
    ))
}
