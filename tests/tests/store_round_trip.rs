use chrono::{TimeZone, Utc};
use griddle::{Mapper, Record, Value};
use tests::{init_logging, memory_mapper, test_schema, tv_show_schema};

#[test]
fn every_field_type_survives_the_store() {
    let schema = test_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let aired = Utc.with_ymd_and_hms(2013, 1, 17, 14, 30, 0).unwrap();

    let mut record = Record::new(schema);
    record.set("str_field", "hello").unwrap();
    record.set("int_field", 42).unwrap();
    record.set("float_field", 1.5).unwrap();
    record.set("bool_field", true).unwrap();
    record.set("date_field", aired).unwrap();

    let id = mapper.save(&mut record).unwrap();
    let fetched = mapper.fetch(id).unwrap().expect("row exists");

    assert_eq!(fetched.get("str_field").unwrap().as_str(), Some("hello"));
    assert_eq!(fetched.get("int_field").unwrap().as_i64(), Some(42));
    assert_eq!(fetched.get("float_field").unwrap().as_f64(), Some(1.5));
    assert_eq!(fetched.get("bool_field").unwrap().as_bool(), Some(true));
    assert_eq!(fetched.get("date_field").unwrap().as_timestamp(), Some(aired));
}

#[test]
fn time_is_stored_as_canonical_text() {
    let schema = test_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let aired = Utc.with_ymd_and_hms(2013, 1, 17, 14, 30, 0).unwrap();
    let mut record = Record::new(schema);
    record.set("date_field", aired).unwrap();
    let id = mapper.save(&mut record).unwrap();

    let rows = mapper
        .query_records("SELECT * FROM test WHERE id=?", &[Value::I64(id)])
        .unwrap();
    assert_eq!(rows.len(), 1);
    // Hydration parses the canonical text back into the same instant.
    assert_eq!(
        rows[0].get("date_field").unwrap().as_timestamp(),
        Some(aired)
    );
}

#[test]
fn finder_queries_build_on_query_record() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let mut show = Record::new(schema);
    show.set("title", "Pilot").unwrap();
    show.set("points_worth", 10).unwrap();
    mapper.save(&mut show).unwrap();

    let by_title = mapper
        .query_record(
            "SELECT * FROM tv_show WHERE title=? LIMIT 1",
            &[Value::from("Pilot")],
        )
        .unwrap()
        .expect("row exists");
    assert_eq!(by_title.get("points_worth").unwrap().as_i64(), Some(10));

    let missing = mapper
        .query_record(
            "SELECT * FROM tv_show WHERE title=? LIMIT 1",
            &[Value::from("Lost Episode")],
        )
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn mappers_can_share_one_connection() {
    init_logging();

    let mut connection = griddle::Sqlite::in_memory().connect().unwrap();

    let shows = tv_show_schema();
    let tests = test_schema();

    {
        let mut mapper = Mapper::new(shows.clone(), &mut connection);
        mapper.create_table().unwrap();

        let mut show = Record::new(shows.clone());
        show.set("title", "Pilot").unwrap();
        show.set("points_worth", 10).unwrap();
        mapper.save(&mut show).unwrap();
    }

    {
        let mut mapper = Mapper::new(tests.clone(), &mut connection);
        mapper.create_table().unwrap();
    }

    let mut mapper = Mapper::new(shows, &mut connection);
    assert_eq!(mapper.fetch_page(0, 10).unwrap().len(), 1);
}
