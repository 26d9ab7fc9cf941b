//! Core catalog logic for Bookshelf.
//! Entity graph, tag factories, SQLite data mappers and the catalog facade.

pub mod config;
pub mod db;
pub mod engine;
pub mod factory;
pub mod identity;
pub mod logger;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod notify;
pub mod singleton;

pub use config::CatalogConfig;
pub use engine::{Engine, EngineError, EngineResult};
pub use factory::{
    AuthorConstructor, BookFactory, FactoryError, FactoryResult, ReaderConstructor,
    UserConstructor, UserFactory,
};
pub use identity::{EntityKind, IdAllocator};
pub use logger::{ConsoleWriter, FileWriter, Logger, OutputWriter};
pub use logging::{default_log_level, init_logging, logging_status};
pub use mapper::book_mapper::BookMapper;
pub use mapper::reader_mapper::ReaderMapper;
pub use mapper::registry::{Mapper, MapperRegistry, RegistryError};
pub use mapper::{DomainObject, MapperError, MapperKind, MapperResult};
pub use model::book::{Book, BookKind, SharedBook};
pub use model::category::{Category, CategoryId, SharedCategory};
pub use model::user::{Author, Reader, SharedReader, User, UserId, UserKind};
pub use notify::{EventChannel, Listener, ListenerError, ListenerResult, SubscriptionId};
pub use singleton::SingletonRegistry;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
