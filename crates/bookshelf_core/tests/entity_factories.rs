use bookshelf_core::{BookKind, Engine, EngineError, EntityKind, FactoryError, User, UserKind};

#[test]
fn user_tags_produce_matching_variants_with_increasing_ids() {
    let engine = Engine::new();

    let mut last_reader_id = 0;
    let mut last_author_id = 0;
    for round in 0..3 {
        let author = engine.create_user("author", "Frank", format!("Herbert{round}")).unwrap();
        assert_eq!(author.kind(), UserKind::Author);
        assert!(matches!(author, User::Author(_)));
        assert!(author.id() > last_author_id);
        last_author_id = author.id();

        let reader = engine.create_user("reader", "Ann", "Lee").unwrap();
        assert_eq!(reader.kind(), UserKind::Reader);
        assert!(reader.id() > last_reader_id);
        last_reader_id = reader.id();
    }

    assert_eq!(engine.ids().last_issued(EntityKind::Author), last_author_id);
    assert_eq!(engine.ids().last_issued(EntityKind::Reader), last_reader_id);
}

#[test]
fn author_and_reader_sequences_do_not_interfere() {
    let engine = Engine::new();
    let first_author = engine.create_user("author", "A", "One").unwrap();
    let first_reader = engine.create_user("reader", "R", "One").unwrap();
    let second_author = engine.create_user("author", "A", "Two").unwrap();

    assert_eq!(first_author.id(), 1);
    assert_eq!(first_reader.id(), 1);
    assert_eq!(second_author.id(), 2);
}

#[test]
fn unknown_user_tag_fails_without_allocating() {
    let engine = Engine::new();

    let err = engine.create_user("librarian", "No", "One").unwrap_err();
    assert!(matches!(
        err,
        EngineError::Factory(FactoryError::UnknownType { family: "user", ref tag }) if tag == "librarian"
    ));
    assert_eq!(engine.ids().last_issued(EntityKind::Author), 0);
    assert_eq!(engine.ids().last_issued(EntityKind::Reader), 0);

    let next = engine.create_user("reader", "Ann", "Lee").unwrap();
    assert_eq!(next.id(), 1);
}

#[test]
fn book_tags_produce_matching_kinds() {
    let engine = Engine::new();
    let author = engine
        .create_user("author", "Isaac", "Asimov")
        .unwrap()
        .into_author()
        .unwrap();
    let category = engine.create_category("Science");

    for (tag, kind) in [
        ("study", BookKind::Study),
        ("reference", BookKind::Reference),
        ("scientific", BookKind::Scientific),
    ] {
        let book = engine
            .create_book(tag, format!("{tag} book"), &author, &category)
            .unwrap();
        assert_eq!(book.kind(), Some(kind));
        assert_eq!(book.author(), "Isaac Asimov");
        assert_eq!(book.category(), "Science");
    }
    assert_eq!(category.borrow().books().len(), 3);
}

#[test]
fn unknown_book_tag_fails() {
    let engine = Engine::new();
    let author = engine
        .create_user("author", "Isaac", "")
        .unwrap()
        .into_author()
        .unwrap();
    let category = engine.create_category("Science");

    let err = engine
        .create_book("poetry", "Odes", &author, &category)
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown book type: `poetry`");
    assert!(category.borrow().books().is_empty());
}

#[test]
fn categories_get_their_own_sequence() {
    let engine = Engine::new();
    engine.create_user("author", "A", "B").unwrap();

    let first = engine.create_category("Fiction");
    let second = engine.create_category("Poetry");
    assert_eq!(first.borrow().id, 1);
    assert_eq!(second.borrow().id, 2);
}
