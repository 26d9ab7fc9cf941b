//! User domain model: authors and readers.
//!
//! # Invariants
//! - Author and reader ids come from independent sequences.
//! - `Reader::books` only grows through `Book::add_reader`.

use crate::identity::EntityKind;
use crate::model::book::{Book, SharedBook};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type UserId = i64;

/// Shared, mutable handle to a reader inside the entity graph.
pub type SharedReader = Rc<RefCell<Reader>>;

/// Concrete user variant, also used as the factory type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Author,
    Reader,
}

impl UserKind {
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Reader => "reader",
        }
    }

    pub(crate) fn entity_kind(self) -> EntityKind {
        match self {
            Self::Author => EntityKind::Author,
            Self::Reader => EntityKind::Reader,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(id: UserId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Name shown on books: `"first last"`, or just `"first"` when the last
    /// name is empty.
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reader {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    books: Vec<Weak<Book>>,
}

impl Reader {
    pub fn new(id: UserId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            books: Vec::new(),
        }
    }

    /// Wraps the reader into a graph handle.
    pub fn into_shared(self) -> SharedReader {
        Rc::new(RefCell::new(self))
    }

    /// Books this reader was added to, in insertion order.
    ///
    /// Books that were dropped from every owner are skipped.
    pub fn books(&self) -> Vec<SharedBook> {
        self.books.iter().filter_map(Weak::upgrade).collect()
    }

    pub(crate) fn attach_book(&mut self, book: &SharedBook) {
        self.books.push(Rc::downgrade(book));
    }
}

/// A freshly created user of either kind.
#[derive(Debug, Clone)]
pub enum User {
    Author(Author),
    Reader(SharedReader),
}

impl User {
    pub fn kind(&self) -> UserKind {
        match self {
            Self::Author(_) => UserKind::Author,
            Self::Reader(_) => UserKind::Reader,
        }
    }

    pub fn id(&self) -> UserId {
        match self {
            Self::Author(author) => author.id,
            Self::Reader(reader) => reader.borrow().id,
        }
    }

    pub fn as_author(&self) -> Option<&Author> {
        match self {
            Self::Author(author) => Some(author),
            Self::Reader(_) => None,
        }
    }

    pub fn into_author(self) -> Option<Author> {
        match self {
            Self::Author(author) => Some(author),
            Self::Reader(_) => None,
        }
    }

    pub fn into_reader(self) -> Option<SharedReader> {
        match self {
            Self::Reader(reader) => Some(reader),
            Self::Author(_) => None,
        }
    }
}
