//! Catalog facade over the in-memory entity graph.
//!
//! # Responsibility
//! - Hold the canonical collections used for lookups.
//! - Delegate entity creation to the tag factories and the id allocator.
//!
//! # Invariants
//! - `create_*` returns an unregistered entity; the caller registers it with
//!   the matching `register_*` call before it becomes visible to `get_*`.
//! - Lookups are linear scans that return the first match.

use crate::factory::{BookFactory, FactoryError, UserFactory};
use crate::identity::{EntityKind, IdAllocator};
use crate::model::book::SharedBook;
use crate::model::category::{Category, CategoryId, SharedCategory};
use crate::model::user::{Author, SharedReader, User, UserId};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Factory(FactoryError),
    NotFound { entity: &'static str, key: String },
    InvalidEncoding(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Factory(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::InvalidEncoding(value) => {
                write!(f, "value is not valid UTF-8 once decoded: `{value}`")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Factory(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidEncoding(_) => None,
        }
    }
}

impl From<FactoryError> for EngineError {
    fn from(value: FactoryError) -> Self {
        Self::Factory(value)
    }
}

#[derive(Default)]
pub struct Engine {
    ids: IdAllocator,
    user_factory: UserFactory,
    book_factory: BookFactory,
    books: Vec<SharedBook>,
    authors: Vec<Author>,
    readers: Vec<SharedReader>,
    categories: Vec<SharedCategory>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an engine with custom tag registries.
    pub fn with_factories(user_factory: UserFactory, book_factory: BookFactory) -> Self {
        Self {
            user_factory,
            book_factory,
            ..Self::default()
        }
    }

    pub fn user_factory_mut(&mut self) -> &mut UserFactory {
        &mut self.user_factory
    }

    pub fn book_factory_mut(&mut self) -> &mut BookFactory {
        &mut self.book_factory
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Creates an unregistered user of the tagged kind.
    pub fn create_user(
        &self,
        tag: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> EngineResult<User> {
        Ok(self
            .user_factory
            .create(&self.ids, tag, first_name, last_name)?)
    }

    /// Creates an unregistered category with a fresh id.
    pub fn create_category(&self, name: impl Into<String>) -> SharedCategory {
        Category::new(self.ids.next_id(EntityKind::Category), name).into_shared()
    }

    /// Creates a book and appends it to `category.books`. The book itself is
    /// not registered in the engine.
    pub fn create_book(
        &self,
        tag: &str,
        name: impl Into<String>,
        author: &Author,
        category: &SharedCategory,
    ) -> EngineResult<SharedBook> {
        Ok(self.book_factory.create(tag, name, author, category)?)
    }

    /// Registers a user into `authors` or `readers` according to its kind.
    pub fn register_user(&mut self, user: User) {
        match user {
            User::Author(author) => self.register_author(author),
            User::Reader(reader) => self.register_reader(reader),
        }
    }

    pub fn register_author(&mut self, author: Author) {
        debug!("event=engine_register module=engine entity=author id={}", author.id);
        self.authors.push(author);
    }

    pub fn register_reader(&mut self, reader: SharedReader) {
        debug!(
            "event=engine_register module=engine entity=reader id={}",
            reader.borrow().id
        );
        self.readers.push(reader);
    }

    pub fn register_category(&mut self, category: SharedCategory) {
        debug!(
            "event=engine_register module=engine entity=category id={}",
            category.borrow().id
        );
        self.categories.push(category);
    }

    pub fn register_book(&mut self, book: SharedBook) {
        debug!("event=engine_register module=engine entity=book");
        self.books.push(book);
    }

    pub fn books(&self) -> &[SharedBook] {
        &self.books
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn readers(&self) -> &[SharedReader] {
        &self.readers
    }

    pub fn categories(&self) -> &[SharedCategory] {
        &self.categories
    }

    pub fn get_book(&self, name: &str) -> EngineResult<SharedBook> {
        self.books
            .iter()
            .find(|book| book.name() == name)
            .cloned()
            .ok_or_else(|| not_found("book", name))
    }

    pub fn get_category_by_id(&self, id: CategoryId) -> EngineResult<SharedCategory> {
        self.categories
            .iter()
            .find(|category| category.borrow().id == id)
            .map(Rc::clone)
            .ok_or_else(|| not_found("category", id))
    }

    pub fn get_reader_by_id(&self, id: UserId) -> EngineResult<SharedReader> {
        self.readers
            .iter()
            .find(|reader| reader.borrow().id == id)
            .map(Rc::clone)
            .ok_or_else(|| not_found("reader", id))
    }

    /// Decodes one form-encoded value: `+` becomes a space and `%XX` becomes
    /// the byte `0xXX`. Malformed escapes are kept literally.
    ///
    /// # Errors
    /// - `InvalidEncoding` when the decoded bytes are not UTF-8.
    pub fn decode_value(value: &str) -> EngineResult<String> {
        let bytes = value.as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut index = 0;
        while index < bytes.len() {
            match bytes[index] {
                b'+' => {
                    decoded.push(b' ');
                    index += 1;
                }
                b'%' => match escaped_byte(&bytes[index + 1..]) {
                    Some(byte) => {
                        decoded.push(byte);
                        index += 3;
                    }
                    None => {
                        decoded.push(b'%');
                        index += 1;
                    }
                },
                other => {
                    decoded.push(other);
                    index += 1;
                }
            }
        }

        String::from_utf8(decoded).map_err(|_| EngineError::InvalidEncoding(value.to_string()))
    }
}

fn escaped_byte(rest: &[u8]) -> Option<u8> {
    let high = char::from(*rest.first()?).to_digit(16)?;
    let low = char::from(*rest.get(1)?).to_digit(16)?;
    u8::try_from(high * 16 + low).ok()
}

fn not_found(entity: &'static str, key: impl Display) -> EngineError {
    let key = key.to_string();
    warn!("event=engine_lookup module=engine status=not_found entity={entity} key={key}");
    EngineError::NotFound { entity, key }
}
