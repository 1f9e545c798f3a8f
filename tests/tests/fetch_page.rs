use griddle::Record;
use tests::{memory_mapper, tv_show_schema};

#[test]
fn pages_walk_the_table() {
    let schema = tv_show_schema();
    let (mut mapper, _recording) = memory_mapper(schema.clone());

    for index in 0..5 {
        let mut show = Record::new(schema.clone());
        show.set("title", format!("Episode {index}").as_str()).unwrap();
        show.set("points_worth", index).unwrap();
        mapper.save(&mut show).unwrap();
    }

    assert_eq!(mapper.fetch_page(0, 2).unwrap().len(), 2);
    assert_eq!(mapper.fetch_page(1, 2).unwrap().len(), 2);
    assert_eq!(mapper.fetch_page(2, 2).unwrap().len(), 1);
    assert!(mapper.fetch_page(3, 2).unwrap().is_empty());
}

#[test]
fn page_values_are_interpolated_not_bound() {
    let schema = tv_show_schema();
    let (mut mapper, recording) = memory_mapper(schema);

    mapper.fetch_page(1, 2).unwrap();

    let statement = recording.last().expect("a SELECT was executed");
    assert_eq!(statement.sql, r#"SELECT * FROM "tv_show" LIMIT 2,2"#);
    assert!(statement.params.is_empty());
}
