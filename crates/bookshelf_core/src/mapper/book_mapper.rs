//! Mapper for the `book` table.
//!
//! # Invariants
//! - Rows keep only the derived `author` and `category` strings, so loading
//!   a book rebuilds throwaway author/category values from them. Author names
//!   with more than two words lose everything after the second word.
//! - Loaded books have no kind, no readers and no listeners.
//! - `update` and `delete` are keyed by book name.

use super::{log_failure, not_found, DomainObject, MapperError, MapperKind, MapperResult};
use crate::model::book::{Book, SharedBook};
use crate::model::category::Category;
use crate::model::user::Author;
use crate::model::DETACHED_ID;
use log::debug;
use rusqlite::{params, Connection, Row, ToSql};

const TABLE: &str = "book";

impl DomainObject for Book {
    fn mapper_kind(&self) -> MapperKind {
        MapperKind::Book
    }
}

pub struct BookMapper<'conn> {
    conn: &'conn Connection,
}

impl<'conn> BookMapper<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn table_name(&self) -> &'static str {
        TABLE
    }

    /// Loads every book, ordered by id.
    pub fn all(&self) -> MapperResult<Vec<SharedBook>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, author, category FROM book ORDER BY id;")?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    pub fn find_by_id(&self, id: i64) -> MapperResult<SharedBook> {
        self.find_one("id", &id, &id)
    }

    pub fn find_by_name(&self, name: &str) -> MapperResult<SharedBook> {
        self.find_one("name", &name, &name)
    }

    /// Inserts a new row and returns its id.
    pub fn insert(&self, book: &Book) -> MapperResult<i64> {
        self.conn
            .execute(
                "INSERT INTO book (name, author, category) VALUES (?1, ?2, ?3);",
                params![book.name(), book.author(), book.category()],
            )
            .map_err(|err| {
                log_failure("insert", TABLE, &err);
                MapperError::Commit(err)
            })?;

        let row_id = self.conn.last_insert_rowid();
        debug!("event=mapper_insert module=mapper status=ok table={TABLE} row_id={row_id}");
        Ok(row_id)
    }

    /// Rewrites author and category of the row with the same name.
    pub fn update(&self, book: &Book) -> MapperResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE book SET name = ?1, author = ?2, category = ?3 WHERE name = ?1;",
                params![book.name(), book.author(), book.category()],
            )
            .map_err(|err| {
                log_failure("update", TABLE, &err);
                MapperError::Update(err)
            })?;

        if changed == 0 {
            return Err(not_found("name", book.name()));
        }
        debug!("event=mapper_update module=mapper status=ok table={TABLE} rows={changed}");
        Ok(())
    }

    pub fn delete(&self, book: &Book) -> MapperResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM book WHERE name = ?1;", [book.name()])
            .map_err(|err| {
                log_failure("delete", TABLE, &err);
                MapperError::Delete(err)
            })?;

        if changed == 0 {
            return Err(not_found("name", book.name()));
        }
        debug!("event=mapper_delete module=mapper status=ok table={TABLE} rows={changed}");
        Ok(())
    }

    fn find_one(
        &self,
        column: &'static str,
        value: &dyn ToSql,
        shown: &dyn std::fmt::Display,
    ) -> MapperResult<SharedBook> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, name, author, category FROM book WHERE {column} = ?1;"
        ))?;
        let mut rows = stmt.query([value])?;
        if let Some(row) = rows.next()? {
            return Ok(parse_book_row(row)?);
        }
        Err(not_found(column, shown))
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<SharedBook> {
    let name: String = row.get("name")?;
    let author_text: String = row.get("author")?;
    let category_text: String = row.get("category")?;
    Ok(rehydrate(name, &author_text, category_text))
}

fn rehydrate(name: String, author_text: &str, category_text: String) -> SharedBook {
    let mut words = author_text.split_whitespace();
    let first_name = words.next().unwrap_or_default();
    let last_name = words.next().unwrap_or_default();
    let author = Author::new(DETACHED_ID, first_name, last_name);
    let category = Category::new(DETACHED_ID, category_text).into_shared();
    Book::new(None, name, &author, &category)
}
