use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    Author, Book, BookKind, Category, DomainObject, Engine, Mapper, MapperError, MapperKind,
    MapperRegistry, Reader, RegistryError,
};
use rusqlite::Connection;

#[test]
fn inserted_reader_is_listed_by_all() {
    let conn = open_db_in_memory().unwrap();
    let registry = MapperRegistry::new(&conn);
    let engine = Engine::new();
    let reader = engine
        .create_user("reader", "Ann", "Lee")
        .unwrap()
        .into_reader()
        .unwrap();

    registry.reader_mapper().insert(&reader.borrow()).unwrap();

    let readers = registry.reader_mapper().all().unwrap();
    assert_eq!(readers.len(), 1);
    assert_eq!(readers[0].borrow().first_name, "Ann");
    assert_eq!(readers[0].borrow().last_name, "Lee");
}

#[test]
fn find_by_id_roundtrips_names() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).reader_mapper();

    let row_id = mapper.insert(&Reader::new(42, "Ann", "Lee")).unwrap();
    let loaded = mapper.find_by_id(row_id).unwrap();

    let loaded = loaded.borrow();
    assert_eq!(loaded.id, row_id);
    assert_eq!(loaded.first_name, "Ann");
    assert_eq!(loaded.last_name, "Lee");
}

#[test]
fn insert_does_not_backfill_entity_id() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).reader_mapper();
    mapper.insert(&Reader::new(100, "First", "Row")).unwrap();

    let reader = Reader::new(7, "Ann", "Lee");
    let row_id = mapper.insert(&reader).unwrap();
    assert_eq!(row_id, 2);
    assert_eq!(reader.id, 7);
}

#[test]
fn find_by_id_on_missing_row_returns_record_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).reader_mapper();

    let err = mapper.find_by_id(99).unwrap_err();
    assert!(matches!(err, MapperError::RecordNotFound(ref message) if message.contains("id=99")));
    assert_eq!(err.to_string(), "Record not found: record with id=99 not found");
}

#[test]
fn reader_update_and_delete_are_keyed_by_id() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).reader_mapper();
    let row_id = mapper.insert(&Reader::new(0, "Ann", "Lee")).unwrap();

    let stored = mapper.find_by_id(row_id).unwrap();
    stored.borrow_mut().last_name = "Smith".to_string();
    mapper.update(&stored.borrow()).unwrap();
    assert_eq!(mapper.find_by_id(row_id).unwrap().borrow().last_name, "Smith");

    mapper.delete(&stored.borrow()).unwrap();
    assert!(matches!(
        mapper.find_by_id(row_id),
        Err(MapperError::RecordNotFound(_))
    ));
    assert!(mapper.all().unwrap().is_empty());
}

#[test]
fn reader_update_and_delete_of_missing_row_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).reader_mapper();
    let ghost = Reader::new(5, "No", "Body");

    assert!(matches!(mapper.update(&ghost), Err(MapperError::RecordNotFound(_))));
    assert!(matches!(mapper.delete(&ghost), Err(MapperError::RecordNotFound(_))));
}

#[test]
fn mutations_without_tables_wrap_storage_errors() {
    let conn = Connection::open_in_memory().unwrap();
    let registry = MapperRegistry::new(&conn);
    let reader = Reader::new(1, "Ann", "Lee");

    let insert = registry.reader_mapper().insert(&reader).unwrap_err();
    assert!(matches!(insert, MapperError::Commit(_)));
    assert!(insert.to_string().starts_with("Db commit error:"));

    let update = registry.reader_mapper().update(&reader).unwrap_err();
    assert!(matches!(update, MapperError::Update(_)));

    let delete = registry.reader_mapper().delete(&reader).unwrap_err();
    assert!(matches!(delete, MapperError::Delete(_)));

    let query = registry.book_mapper().all().unwrap_err();
    assert!(matches!(query, MapperError::Query(_)));
}

#[test]
fn book_roundtrip_rebuilds_derived_strings() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).book_mapper();
    let category = Category::new(1, "Fiction").into_shared();
    let book = Book::new(
        Some(BookKind::Study),
        "Dune",
        &Author::new(1, "Frank", "Herbert"),
        &category,
    );

    let row_id = mapper.insert(&book).unwrap();

    let by_name = mapper.find_by_name("Dune").unwrap();
    assert_eq!(by_name.author(), "Frank Herbert");
    assert_eq!(by_name.category(), "Fiction");
    assert_eq!(by_name.kind(), None);

    let by_id = mapper.find_by_id(row_id).unwrap();
    assert_eq!(by_id.name(), "Dune");

    let all = mapper.all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].author(), "Frank Herbert");
}

#[test]
fn book_lookups_on_missing_rows_fail() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).book_mapper();

    let err = mapper.find_by_name("Missing").unwrap_err();
    assert_eq!(err.to_string(), "Record not found: record with name=Missing not found");
    assert!(matches!(mapper.find_by_id(3), Err(MapperError::RecordNotFound(_))));
}

#[test]
fn book_update_rewrites_author_and_category_by_name() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).book_mapper();
    mapper
        .insert(&Book::unlinked(None, "Dune", "Frank Herbert", "Fiction"))
        .unwrap();

    mapper
        .update(&Book::unlinked(None, "Dune", "Brian Herbert", "Classics"))
        .unwrap();

    let stored = mapper.find_by_name("Dune").unwrap();
    assert_eq!(stored.author(), "Brian Herbert");
    assert_eq!(stored.category(), "Classics");

    let missing = mapper.update(&Book::unlinked(None, "Emma", "Jane Austen", "Classics"));
    assert!(matches!(missing, Err(MapperError::RecordNotFound(_))));
}

#[test]
fn book_delete_is_keyed_by_name() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).book_mapper();
    let book = Book::unlinked(None, "Dune", "Frank Herbert", "Fiction");
    mapper.insert(&book).unwrap();

    mapper.delete(&book).unwrap();
    assert!(mapper.all().unwrap().is_empty());
    assert!(matches!(mapper.delete(&book), Err(MapperError::RecordNotFound(_))));
}

#[test]
fn duplicate_book_name_is_a_commit_error() {
    let conn = open_db_in_memory().unwrap();
    let mapper = MapperRegistry::new(&conn).book_mapper();
    let book = Book::unlinked(None, "Dune", "Frank Herbert", "Fiction");
    mapper.insert(&book).unwrap();

    assert!(matches!(mapper.insert(&book), Err(MapperError::Commit(_))));
    assert_eq!(mapper.all().unwrap().len(), 1);
}

#[test]
fn registry_dispatches_on_entity_kind() {
    let conn = open_db_in_memory().unwrap();
    let registry = MapperRegistry::new(&conn);
    let reader = Reader::new(1, "Ann", "Lee");
    let book = Book::unlinked(None, "Dune", "Frank Herbert", "Fiction");

    assert_eq!(reader.mapper_kind(), MapperKind::Reader);
    let reader_mapper = registry.get_mapper(&reader);
    assert_eq!(reader_mapper.kind(), MapperKind::Reader);
    assert_eq!(reader_mapper.table_name(), "reader");

    let book_mapper = registry.get_mapper(&book);
    assert!(matches!(book_mapper, Mapper::Book(_)));
    book_mapper.into_book().unwrap().insert(&book).unwrap();

    // Fresh mappers share the same connection.
    assert_eq!(registry.book_mapper().all().unwrap().len(), 1);
}

#[test]
fn registry_dispatches_on_kind_name() {
    let conn = open_db_in_memory().unwrap();
    let registry = MapperRegistry::new(&conn);

    let reader = registry.get_current_mapper("reader").unwrap();
    assert!(reader.into_reader().is_some());
    let book = registry.get_current_mapper(" book ").unwrap();
    assert!(book.into_reader().is_none());

    assert!(matches!(
        registry.get_current_mapper("author"),
        Err(RegistryError::UnknownMapper(ref name)) if name == "author"
    ));
}
