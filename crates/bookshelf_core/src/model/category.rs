//! Category domain model.

use crate::model::book::SharedBook;
use std::cell::RefCell;
use std::rc::Rc;

pub type CategoryId = i64;

/// Shared, mutable handle to a category inside the entity graph.
pub type SharedCategory = Rc<RefCell<Category>>;

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    books: Vec<SharedBook>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            books: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedCategory {
        Rc::new(RefCell::new(self))
    }

    /// Books created under this category, in creation order.
    pub fn books(&self) -> &[SharedBook] {
        &self.books
    }

    pub(crate) fn push_book(&mut self, book: SharedBook) {
        self.books.push(book);
    }
}
