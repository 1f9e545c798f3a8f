use crate::record::Record;
use griddle_core::Result;

/// Lifecycle hooks for a record kind.
///
/// [`Mapper`](crate::Mapper) drives these around its operations. The
/// defaults give the base behavior: required-field validation before a save
/// and the pending-to-persisted merge after one. Concrete kinds override a
/// hook to add their own bookkeeping and usually delegate back to the
/// default body.
///
/// `Record` implements this trait directly, so schema-only usage needs no
/// wrapper type.
pub trait Model {
    fn record(&self) -> &Record;

    fn record_mut(&mut self) -> &mut Record;

    /// Runs before any SQL is issued for a save. An error stops the save
    /// with no statement executed.
    fn before_save(&mut self) -> Result<()> {
        self.record().check_required()
    }

    /// Runs after a successful save.
    fn after_save(&mut self) {
        self.record_mut().commit();
    }

    /// Runs before the DELETE of a trash operation.
    fn before_trash(&mut self) -> Result<()> {
        Ok(())
    }

    /// Runs after the DELETE, before the mapper resets the key.
    fn after_trash(&mut self) {}
}

impl Model for Record {
    fn record(&self) -> &Record {
        self
    }

    fn record_mut(&mut self) -> &mut Record {
        self
    }
}
