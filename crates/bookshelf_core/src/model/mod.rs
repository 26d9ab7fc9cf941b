//! In-memory entity graph for the catalog.
//!
//! # Responsibility
//! - Define users, categories and books as plain data holders.
//! - Keep cross references between entities (reader <-> book, category -> book).
//!
//! # Invariants
//! - Book stores author and category as derived strings, never as references.
//! - Reader -> book links are non-owning (`Weak`), so the graph has no cycles.
//! - Cross references are denormalized and never cascade on delete.

pub mod book;
pub mod category;
pub mod user;

/// Id carried by entities rebuilt from storage rows that never went through
/// the id allocator (throwaway authors/categories of a hydrated book).
pub const DETACHED_ID: i64 = 0;
