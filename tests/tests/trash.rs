use griddle::{Record, UNSAVED_KEY};
use tests::{memory_mapper, tv_show_schema};

#[test]
fn trash_deletes_and_resets_the_key() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();
    let id = mapper.save(&mut show).unwrap();

    assert!(mapper.trash(&mut show).unwrap());
    assert_eq!(show.get("id").unwrap().as_i64(), Some(UNSAVED_KEY));
    assert!(mapper.fetch(id).unwrap().is_none());
}

#[test]
fn trash_of_a_missing_row_is_false() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();
    mapper.save(&mut show).unwrap();

    assert!(mapper.trash(&mut show).unwrap());
    // The key is already the unsaved sentinel, nothing matches it.
    assert!(!mapper.trash(&mut show).unwrap());
}

#[test]
fn trashed_record_saves_as_a_fresh_insert() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();
    let first = mapper.save(&mut show).unwrap();

    mapper.trash(&mut show).unwrap();
    let second = mapper.save(&mut show).unwrap();

    assert!(second > 0);
    assert_ne!(first, UNSAVED_KEY);
    assert_eq!(
        mapper
            .fetch(second)
            .unwrap()
            .expect("row exists")
            .get("title")
            .unwrap()
            .as_str(),
        Some("Pilot")
    );
}
