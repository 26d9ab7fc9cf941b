//! Data mappers between catalog tables and entities.
//!
//! # Responsibility
//! - Own every SQL statement that reads or writes `reader` and `book` rows.
//! - Rebuild entities from rows and report failures as typed errors.
//!
//! # Invariants
//! - Every mutation is a single autocommitted statement; nothing is rolled
//!   back on failure.
//! - Lookups never return a partially built entity.
//! - `insert` does not back-fill the entity id; it returns the new row id.

use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod book_mapper;
pub mod reader_mapper;
pub mod registry;

pub type MapperResult<T> = Result<T, MapperError>;

#[derive(Debug)]
pub enum MapperError {
    RecordNotFound(String),
    Commit(rusqlite::Error),
    Update(rusqlite::Error),
    Delete(rusqlite::Error),
    Query(rusqlite::Error),
}

impl Display for MapperError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RecordNotFound(message) => write!(f, "Record not found: {message}"),
            Self::Commit(err) => write!(f, "Db commit error: {err}"),
            Self::Update(err) => write!(f, "Db update error: {err}"),
            Self::Delete(err) => write!(f, "Db delete error: {err}"),
            Self::Query(err) => write!(f, "Db query error: {err}"),
        }
    }
}

impl Error for MapperError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RecordNotFound(_) => None,
            Self::Commit(err) | Self::Update(err) | Self::Delete(err) | Self::Query(err) => {
                Some(err)
            }
        }
    }
}

impl From<rusqlite::Error> for MapperError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}

/// Mapper family an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperKind {
    Reader,
    Book,
}

impl MapperKind {
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Book => "book",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        [Self::Reader, Self::Book]
            .into_iter()
            .find(|kind| kind.as_tag() == tag)
    }
}

/// Entity that can be persisted through a mapper.
pub trait DomainObject {
    fn mapper_kind(&self) -> MapperKind;
}

fn not_found(key: &str, value: impl Display) -> MapperError {
    MapperError::RecordNotFound(format!("record with {key}={value} not found"))
}

fn log_failure(op: &'static str, table: &str, err: &rusqlite::Error) {
    error!("event=mapper_{op} module=mapper status=error table={table} error={err}");
}
