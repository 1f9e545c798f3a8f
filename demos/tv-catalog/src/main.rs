//! A small TV-show catalog driving the record/mapper API end to end:
//! schema declaration, table creation, single and batch saves, finders,
//! paging, and deletion.

use griddle::{FieldType, Mapper, Model, Record, Result, Schema, Value};
use std::sync::Arc;

/// A show in the catalog. Defaults `points_worth` before the base
/// validation runs, so callers only have to supply a title.
struct TVShow {
    record: Record,
}

impl TVShow {
    fn new(schema: Arc<Schema>) -> Self {
        Self {
            record: Record::new(schema),
        }
    }

    fn title(&self) -> String {
        self.record
            .get("title")
            .ok()
            .and_then(|title| title.as_str().map(str::to_string))
            .unwrap_or_default()
    }
}

impl Model for TVShow {
    fn record(&self) -> &Record {
        &self.record
    }

    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    fn before_save(&mut self) -> Result<()> {
        if !self.record.has("points_worth") {
            self.record.set("points_worth", 0)?;
        }
        self.record.check_required()
    }
}

fn tv_show_schema() -> Result<Arc<Schema>> {
    Ok(Arc::new(
        Schema::builder("TVShow")
            .table("tv_show")
            .field("id", FieldType::Key)
            .field("title", FieldType::String)
            .field("description", FieldType::String)
            .field("image_url", FieldType::String)
            .field("trailer_url", FieldType::String)
            .field("points_worth", FieldType::Int)
            .required("title")
            .required("points_worth")
            .build()?,
    ))
}

/// Finder in the style of a DAO layered over the mapper.
fn fetch_by_title(
    mapper: &mut Mapper<griddle::sqlite::Connection>,
    title: &str,
) -> Result<Option<Record>> {
    mapper.query_record(
        "SELECT * FROM tv_show WHERE title=? LIMIT 1",
        &[Value::from(title)],
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let schema = tv_show_schema()?;
    let connection = griddle::Sqlite::in_memory().connect()?;
    let mut mapper = Mapper::new(schema.clone(), connection);
    mapper.create_table()?;

    // Single save: the hook fills in the missing points.
    let mut pilot = TVShow::new(schema.clone());
    pilot
        .record_mut()
        .import([("title", "Pilot"), ("description", "Where it all begins")])?;
    let pilot_id = mapper.save(&mut pilot)?;
    println!("saved {:?} as #{pilot_id}", pilot.title());

    // Batch save: two new shows land in one statement.
    let mut batch = Vec::new();
    for (title, points) in [("Finale", 50), ("Reunion Special", 5)] {
        let mut show = TVShow::new(schema.clone());
        show.record_mut().set("title", title)?;
        show.record_mut().set("points_worth", points)?;
        batch.push(show);
    }
    let affected = mapper.save_batch(&mut batch)?;
    println!("batch save touched {affected} rows");

    // Minimal update: only the changed column travels.
    let mut fetched = mapper
        .fetch(pilot_id)?
        .ok_or_else(|| anyhow::anyhow!("pilot vanished"))?;
    fetched.set("points_worth", 25)?;
    mapper.save(&mut fetched)?;

    if let Some(found) = fetch_by_title(&mut mapper, "Finale")? {
        println!(
            "'Finale' is worth {} points",
            found.get("points_worth")?.as_i64().unwrap_or(0)
        );
    }

    for record in mapper.fetch_page(0, 10)? {
        let line: Vec<String> = record
            .fields()
            .map(|(field, value)| format!("{field}={value:?}"))
            .collect();
        println!("{}", line.join(" "));
    }

    let removed = mapper.trash(&mut fetched)?;
    println!("trashed the pilot: {removed}");

    Ok(())
}
