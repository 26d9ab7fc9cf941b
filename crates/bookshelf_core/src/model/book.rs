//! Book domain model.
//!
//! # Responsibility
//! - Hold book display data derived from its author and category.
//! - Track readers and announce reader additions to subscribed listeners.
//!
//! # Invariants
//! - `author` and `category` are derived strings fixed at creation time.
//! - `readers` grows only via `add_reader`, which also back-links the reader.
//! - A failing listener does not undo the reader link already recorded.

use crate::model::category::SharedCategory;
use crate::model::user::{Author, SharedReader};
use crate::notify::{EventChannel, Listener, ListenerResult, SubscriptionId};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a book inside the entity graph.
pub type SharedBook = Rc<Book>;

/// Book flavor selected by the factory type tag. Carries no extra state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookKind {
    Study,
    Reference,
    Scientific,
}

impl BookKind {
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Reference => "reference",
            Self::Scientific => "scientific",
        }
    }
}

#[derive(Debug)]
pub struct Book {
    name: String,
    author: String,
    category: String,
    /// `None` for books rebuilt from storage, which does not keep the kind.
    kind: Option<BookKind>,
    readers: RefCell<Vec<SharedReader>>,
    events: EventChannel<Book>,
}

impl Book {
    /// Creates a book and records it in `category.books`.
    pub fn new(
        kind: Option<BookKind>,
        name: impl Into<String>,
        author: &Author,
        category: &SharedCategory,
    ) -> SharedBook {
        let category_name = category.borrow().name.clone();
        let book = Rc::new(Self::unlinked(
            kind,
            name,
            author.display_name(),
            category_name,
        ));
        category.borrow_mut().push_book(Rc::clone(&book));
        book
    }

    /// Creates a book from already derived strings without touching any
    /// category.
    pub fn unlinked(
        kind: Option<BookKind>,
        name: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            category: category.into(),
            kind,
            readers: RefCell::new(Vec::new()),
            events: EventChannel::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> Option<BookKind> {
        self.kind
    }

    pub fn readers(&self) -> Vec<SharedReader> {
        self.readers.borrow().clone()
    }

    pub fn reader_count(&self) -> usize {
        self.readers.borrow().len()
    }

    /// Positional access to readers, in the order they were added.
    pub fn reader_at(&self, index: usize) -> Option<SharedReader> {
        self.readers.borrow().get(index).cloned()
    }

    pub fn subscribe(&self, listener: Rc<dyn Listener<Book>>) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.events.len()
    }

    /// Adds `reader`, back-links this book into `reader.books`, then notifies
    /// every listener in subscription order.
    ///
    /// # Errors
    /// - Returns the first listener error. Both links stay in place and the
    ///   remaining listeners are skipped.
    pub fn add_reader(self: &Rc<Self>, reader: &SharedReader) -> ListenerResult<()> {
        self.readers.borrow_mut().push(Rc::clone(reader));
        reader.borrow_mut().attach_book(self);
        debug!(
            "event=book_add_reader module=model status=ok reader_id={} readers={} listeners={}",
            reader.borrow().id,
            self.reader_count(),
            self.events.len()
        );
        self.events.publish(self)
    }
}
