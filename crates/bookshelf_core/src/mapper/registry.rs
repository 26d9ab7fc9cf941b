//! Mapper lookup by entity or by kind name.
//!
//! Every call hands out a fresh mapper bound to the registry's connection;
//! mappers are never cached.

use super::book_mapper::BookMapper;
use super::reader_mapper::ReaderMapper;
use super::{DomainObject, MapperKind};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    UnknownMapper(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMapper(name) => write!(f, "no mapper registered for `{name}`"),
        }
    }
}

impl Error for RegistryError {}

/// A mapper resolved at runtime.
pub enum Mapper<'conn> {
    Reader(ReaderMapper<'conn>),
    Book(BookMapper<'conn>),
}

impl<'conn> Mapper<'conn> {
    pub fn kind(&self) -> MapperKind {
        match self {
            Self::Reader(_) => MapperKind::Reader,
            Self::Book(_) => MapperKind::Book,
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Reader(mapper) => mapper.table_name(),
            Self::Book(mapper) => mapper.table_name(),
        }
    }

    pub fn into_reader(self) -> Option<ReaderMapper<'conn>> {
        match self {
            Self::Reader(mapper) => Some(mapper),
            Self::Book(_) => None,
        }
    }

    pub fn into_book(self) -> Option<BookMapper<'conn>> {
        match self {
            Self::Book(mapper) => Some(mapper),
            Self::Reader(_) => None,
        }
    }
}

/// Resolves mappers against one shared connection.
#[derive(Clone, Copy)]
pub struct MapperRegistry<'conn> {
    conn: &'conn Connection,
}

impl<'conn> MapperRegistry<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Picks the mapper matching the runtime kind of `object`.
    pub fn get_mapper(&self, object: &dyn DomainObject) -> Mapper<'conn> {
        self.mapper_for(object.mapper_kind())
    }

    /// Picks a mapper by kind name (`reader` or `book`).
    pub fn get_current_mapper(&self, name: &str) -> Result<Mapper<'conn>, RegistryError> {
        MapperKind::parse(name)
            .map(|kind| self.mapper_for(kind))
            .ok_or_else(|| RegistryError::UnknownMapper(name.to_string()))
    }

    pub fn reader_mapper(&self) -> ReaderMapper<'conn> {
        ReaderMapper::new(self.conn)
    }

    pub fn book_mapper(&self) -> BookMapper<'conn> {
        BookMapper::new(self.conn)
    }

    fn mapper_for(&self, kind: MapperKind) -> Mapper<'conn> {
        match kind {
            MapperKind::Reader => Mapper::Reader(self.reader_mapper()),
            MapperKind::Book => Mapper::Book(self.book_mapper()),
        }
    }
}
