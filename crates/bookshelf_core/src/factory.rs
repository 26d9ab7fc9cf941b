//! Tag-driven entity factories.
//!
//! # Responsibility
//! - Map type tags (`author`, `study`, ...) to entity constructors.
//! - Allow new tags to be registered without touching existing ones.
//!
//! # Invariants
//! - Tags are trimmed, then matched exactly.
//! - An unknown tag fails before any id is allocated.
//! - Created entities are not registered anywhere; the caller owns them.

use crate::identity::IdAllocator;
use crate::model::book::{Book, BookKind, SharedBook};
use crate::model::category::SharedCategory;
use crate::model::user::{Author, Reader, User, UserId, UserKind};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FactoryResult<T> = Result<T, FactoryError>;

pub type AuthorConstructor = fn(UserId, String, String) -> Author;
pub type ReaderConstructor = fn(UserId, String, String) -> Reader;

/// Constructor invoked once the tag is resolved and an id is allocated.
/// The variant selects both the id sequence and the resulting `User` variant.
#[derive(Clone, Copy)]
pub enum UserConstructor {
    Author(AuthorConstructor),
    Reader(ReaderConstructor),
}

impl UserConstructor {
    pub fn kind(self) -> UserKind {
        match self {
            Self::Author(_) => UserKind::Author,
            Self::Reader(_) => UserKind::Reader,
        }
    }

    fn build(self, id: UserId, first_name: String, last_name: String) -> User {
        match self {
            Self::Author(construct) => User::Author(construct(id, first_name, last_name)),
            Self::Reader(construct) => User::Reader(construct(id, first_name, last_name).into_shared()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    UnknownType { family: &'static str, tag: String },
    InvalidTag(String),
    DuplicateTag(String),
}

impl Display for FactoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType { family, tag } => write!(f, "unknown {family} type: `{tag}`"),
            Self::InvalidTag(tag) => write!(f, "type tag is invalid: `{tag}`"),
            Self::DuplicateTag(tag) => write!(f, "type tag already registered: `{tag}`"),
        }
    }
}

impl Error for FactoryError {}

pub struct UserFactory {
    constructors: BTreeMap<String, UserConstructor>,
}

impl UserFactory {
    /// Factory with the built-in `author` and `reader` tags.
    pub fn new() -> Self {
        let constructors = [
            UserConstructor::Author(Author::new),
            UserConstructor::Reader(Reader::new),
        ]
        .into_iter()
        .map(|constructor| (constructor.kind().as_tag().to_string(), constructor))
        .collect();
        Self { constructors }
    }

    /// Registers an extra tag that builds authors from the author sequence.
    pub fn register_author(
        &mut self,
        tag: &str,
        constructor: AuthorConstructor,
    ) -> FactoryResult<()> {
        self.register(tag, UserConstructor::Author(constructor))
    }

    /// Registers an extra tag that builds readers from the reader sequence.
    pub fn register_reader(
        &mut self,
        tag: &str,
        constructor: ReaderConstructor,
    ) -> FactoryResult<()> {
        self.register(tag, UserConstructor::Reader(constructor))
    }

    pub fn register(&mut self, tag: &str, constructor: UserConstructor) -> FactoryResult<()> {
        let tag = normalize_tag(tag)?;
        if self.constructors.contains_key(tag.as_str()) {
            return Err(FactoryError::DuplicateTag(tag));
        }
        self.constructors.insert(tag, constructor);
        Ok(())
    }

    /// Sorted list of known tags.
    pub fn tags(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    pub fn create(
        &self,
        ids: &IdAllocator,
        tag: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> FactoryResult<User> {
        let constructor = self
            .constructors
            .get(tag.trim())
            .copied()
            .ok_or_else(|| FactoryError::UnknownType {
                family: "user",
                tag: tag.to_string(),
            })?;
        let id = ids.next_id(constructor.kind().entity_kind());
        Ok(constructor.build(id, first_name.into(), last_name.into()))
    }
}

impl Default for UserFactory {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BookFactory {
    kinds: BTreeMap<String, BookKind>,
}

impl BookFactory {
    /// Factory with the built-in `study`, `reference` and `scientific` tags.
    pub fn new() -> Self {
        let kinds = [BookKind::Study, BookKind::Reference, BookKind::Scientific]
            .into_iter()
            .map(|kind| (kind.as_tag().to_string(), kind))
            .collect();
        Self { kinds }
    }

    /// Registers an alias tag for an existing book kind.
    pub fn register(&mut self, tag: &str, kind: BookKind) -> FactoryResult<()> {
        let tag = normalize_tag(tag)?;
        if self.kinds.contains_key(tag.as_str()) {
            return Err(FactoryError::DuplicateTag(tag));
        }
        self.kinds.insert(tag, kind);
        Ok(())
    }

    pub fn tags(&self) -> Vec<String> {
        self.kinds.keys().cloned().collect()
    }

    /// Creates a book of the tagged kind and appends it to `category.books`.
    pub fn create(
        &self,
        tag: &str,
        name: impl Into<String>,
        author: &Author,
        category: &SharedCategory,
    ) -> FactoryResult<SharedBook> {
        let kind = self
            .kinds
            .get(tag.trim())
            .copied()
            .ok_or_else(|| FactoryError::UnknownType {
                family: "book",
                tag: tag.to_string(),
            })?;
        Ok(Book::new(Some(kind), name, author, category))
    }
}

impl Default for BookFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_tag(tag: &str) -> FactoryResult<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(FactoryError::InvalidTag(tag.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{BookFactory, FactoryError, UserFactory};
    use crate::identity::{EntityKind, IdAllocator};
    use crate::model::book::BookKind;
    use crate::model::category::Category;
    use crate::model::user::{Author, Reader, UserKind};

    #[test]
    fn unknown_user_tag_allocates_no_id() {
        let ids = IdAllocator::new();
        let factory = UserFactory::new();

        let err = factory.create(&ids, "editor", "A", "B").unwrap_err();
        assert!(matches!(err, FactoryError::UnknownType { family: "user", .. }));
        assert_eq!(ids.last_issued(EntityKind::Author), 0);
        assert_eq!(ids.last_issued(EntityKind::Reader), 0);
    }

    #[test]
    fn registered_author_tag_uses_author_sequence() {
        let ids = IdAllocator::new();
        let mut factory = UserFactory::new();
        factory.register_author("writer", Author::new).unwrap();

        let user = factory.create(&ids, "writer", "Ursula", "Le Guin").unwrap();
        assert_eq!(user.kind(), UserKind::Author);
        assert_eq!(ids.last_issued(EntityKind::Author), user.id());
        assert_eq!(ids.last_issued(EntityKind::Reader), 0);
        assert_eq!(factory.tags(), vec!["author", "reader", "writer"]);
    }

    #[test]
    fn registered_reader_tag_shares_reader_sequence() {
        let ids = IdAllocator::new();
        let mut factory = UserFactory::new();
        factory
            .register_reader("member", |id, first, last| {
                Reader::new(id, first.to_uppercase(), last)
            })
            .unwrap();

        let reader = factory.create(&ids, "reader", "Ann", "Lee").unwrap();
        let member = factory.create(&ids, "member", "Bob", "Ray").unwrap();

        assert_eq!(reader.kind(), UserKind::Reader);
        assert_eq!(member.kind(), UserKind::Reader);
        assert_eq!((reader.id(), member.id()), (1, 2));
        assert_eq!(ids.last_issued(EntityKind::Reader), 2);
        assert_eq!(ids.last_issued(EntityKind::Author), 0);

        let member = member.into_reader().unwrap();
        assert_eq!(member.borrow().first_name, "BOB");
    }

    #[test]
    fn register_rejects_taken_user_tag() {
        let mut factory = UserFactory::new();
        assert_eq!(
            factory.register_author("reader", Author::new),
            Err(FactoryError::DuplicateTag("reader".to_string()))
        );
    }

    #[test]
    fn register_rejects_duplicate_and_blank_tags() {
        let mut factory = BookFactory::new();
        assert_eq!(
            factory.register("study", BookKind::Study),
            Err(FactoryError::DuplicateTag("study".to_string()))
        );
        assert!(matches!(
            factory.register("  ", BookKind::Study),
            Err(FactoryError::InvalidTag(_))
        ));
    }

    #[test]
    fn book_alias_tag_maps_to_kind() {
        let mut factory = BookFactory::new();
        factory.register("textbook", BookKind::Study).unwrap();
        let category = Category::new(1, "Math").into_shared();

        let book = factory
            .create("textbook", "Calculus", &Author::new(1, "Michael", "Spivak"), &category)
            .unwrap();
        assert_eq!(book.kind(), Some(BookKind::Study));
    }

    #[test]
    fn unknown_book_tag_leaves_category_untouched() {
        let factory = BookFactory::new();
        let category = Category::new(1, "Math").into_shared();

        let err = factory
            .create("novel", "Calculus", &Author::new(1, "Michael", "Spivak"), &category)
            .unwrap_err();
        assert!(matches!(err, FactoryError::UnknownType { family: "book", .. }));
        assert!(category.borrow().books().is_empty());
    }
}
