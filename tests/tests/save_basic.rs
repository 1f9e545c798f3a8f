use griddle::Record;
use tests::{memory_mapper, tv_show_schema};

#[test]
fn save_then_fetch() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();

    let id = mapper.save(&mut show).unwrap();
    assert!(id > 0);

    let fetched = mapper.fetch(id).unwrap().expect("row exists");
    assert_eq!(fetched.get("title").unwrap().as_str(), Some("Pilot"));
    assert_eq!(fetched.get("points_worth").unwrap().as_i64(), Some(10));
}

#[test]
fn insert_writes_generated_key_back() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();

    let id = mapper.save(&mut show).unwrap();
    assert_eq!(show.get("id").unwrap().as_i64(), Some(id));
    // The write-back is store-confirmed state, not a pending change.
    assert!(show.updated_fields().is_empty());
}

#[test]
fn second_save_is_an_update() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();
    let first = mapper.save(&mut show).unwrap();

    show.set("title", "Pilot, Revisited").unwrap();
    let second = mapper.save(&mut show).unwrap();
    assert_eq!(first, second);

    let fetched = mapper.fetch(first).unwrap().expect("row exists");
    assert_eq!(
        fetched.get("title").unwrap().as_str(),
        Some("Pilot, Revisited")
    );
}

#[test]
fn update_touches_only_dirty_columns() {
    let schema = tv_show_schema();
    let (mut mapper, recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();
    let id = mapper.save(&mut show).unwrap();

    let mut fetched = mapper.fetch(id).unwrap().expect("row exists");
    fetched.set("title", "New Title").unwrap();

    recording.clear();
    mapper.save(&mut fetched).unwrap();

    let update = recording.last().expect("an UPDATE was executed");
    assert_eq!(
        update.sql,
        r#"UPDATE "tv_show" SET "title"=? WHERE "id"=?"#
    );
    assert_eq!(update.params.len(), 2);
    assert_eq!(update.params[0].as_str(), Some("New Title"));
    assert_eq!(update.params[1].as_i64(), Some(id));
}

#[test]
fn clean_save_is_a_no_op() {
    let schema = tv_show_schema();
    let (mut mapper, recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();
    let id = mapper.save(&mut show).unwrap();

    let mut fetched = mapper.fetch(id).unwrap().expect("row exists");

    recording.clear();
    let returned = mapper.save(&mut fetched).unwrap();

    assert_eq!(returned, id);
    assert!(recording.is_empty());
}

#[test]
fn fetch_missing_id_is_none() {
    let (mut mapper, _recording) = memory_mapper(tv_show_schema());
    assert!(mapper.fetch(42).unwrap().is_none());
}
