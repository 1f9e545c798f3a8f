use griddle::Record;
use tests::{memory_mapper, tv_show_schema};

fn show(schema: &std::sync::Arc<griddle::Schema>, title: &str, points: i64) -> Record {
    let mut record = Record::new(schema.clone());
    record.set("title", title).unwrap();
    record.set("points_worth", points).unwrap();
    record
}

#[test]
fn fetch_batch_of_nothing_skips_the_store() {
    let (mut mapper, recording) = memory_mapper(tv_show_schema());

    let fetched = mapper.fetch_batch(&[]).unwrap();
    assert!(fetched.is_empty());
    assert!(recording.is_empty());
}

#[test]
fn fetch_batch_keys_rows_by_primary_key() {
    let schema = tv_show_schema();
    let (mut mapper, recording) = memory_mapper(schema.clone());

    let a = mapper.save(&mut show(&schema, "Pilot", 10)).unwrap();
    let b = mapper.save(&mut show(&schema, "Finale", 20)).unwrap();

    recording.clear();
    let fetched = mapper.fetch_batch(&[a, b, 9999]).unwrap();

    assert_eq!(recording.len(), 1);
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[&a].get("title").unwrap().as_str(), Some("Pilot"));
    assert_eq!(fetched[&b].get("title").unwrap().as_str(), Some("Finale"));
}

#[test]
fn save_batch_bulk_inserts_new_records() {
    let schema = tv_show_schema();
    let (mut mapper, recording) = memory_mapper(schema.clone());

    let mut records = vec![
        show(&schema, "Pilot", 10),
        show(&schema, "Finale", 20),
    ];

    recording.clear();
    let affected = mapper.save_batch(&mut records).unwrap();

    assert_eq!(affected, 2);
    assert_eq!(recording.len(), 1);
    let bulk = recording.last().unwrap();
    assert!(bulk.sql.starts_with(r#"REPLACE INTO "tv_show""#));

    let page = mapper.fetch_page(0, 10).unwrap();
    assert_eq!(page.len(), 2);
}

#[test]
fn save_batch_routes_persisted_records_through_save() {
    let schema = tv_show_schema();
    let (mut mapper, recording) = memory_mapper(schema.clone());

    let id = mapper.save(&mut show(&schema, "Pilot", 10)).unwrap();
    let mut existing = mapper.fetch(id).unwrap().expect("row exists");
    existing.set("points_worth", 50).unwrap();

    let mut records = vec![existing, show(&schema, "Finale", 20)];

    recording.clear();
    let affected = mapper.save_batch(&mut records).unwrap();

    // The bulk statement covers only the new record.
    assert_eq!(affected, 1);
    assert!(recording.any(|statement| statement.sql.starts_with("UPDATE")));
    assert!(recording.any(|statement| statement.sql.starts_with("REPLACE INTO")));

    let updated = mapper.fetch(id).unwrap().expect("row exists");
    assert_eq!(updated.get("points_worth").unwrap().as_i64(), Some(50));
}

#[test]
fn save_batch_skips_invalid_records() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    let mut incomplete = Record::new(schema.clone());
    incomplete.set("title", "No Points").unwrap();

    let mut records = vec![
        show(&schema, "Pilot", 10),
        incomplete,
        show(&schema, "Finale", 20),
    ];

    let affected = mapper.save_batch(&mut records).unwrap();
    assert_eq!(affected, 2);

    let titles: Vec<String> = mapper
        .fetch_page(0, 10)
        .unwrap()
        .into_iter()
        .map(|record| record.get("title").unwrap().as_str().unwrap().to_string())
        .collect();
    assert!(!titles.contains(&"No Points".to_string()));
}

#[test]
fn save_batch_of_nothing_is_zero() {
    let (mut mapper, recording) = memory_mapper(tv_show_schema());

    let mut records: Vec<Record> = Vec::new();
    assert_eq!(mapper.save_batch(&mut records).unwrap(), 0);
    assert!(recording.is_empty());
}
