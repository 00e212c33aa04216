//! In-memory table of every record read from a file.
//!

use std::path::Path;

use tracing::trace;

use crate::{read_file, FormatError, IngestStats, PositionRecord};

/// All the records, in arrival order.
///
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<PositionRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<PositionRecord>) -> Self {
        RecordStore { records }
    }

    /// Load a whole file, see [`read_file`].
    ///
    #[tracing::instrument]
    pub fn load(fname: &Path) -> Result<(Self, IngestStats), FormatError> {
        let (records, stats) = read_file(fname)?;
        Ok((RecordStore::new(records), stats))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    /// Build a new store with the records matching `pred`, keeping their order.
    ///
    pub fn filter<F>(&self, pred: F) -> RecordStore
    where
        F: Fn(&PositionRecord) -> bool,
    {
        let records: Vec<_> = self.records.iter().filter(|r| pred(r)).cloned().collect();
        trace!("filter: {} -> {}", self.len(), records.len());
        RecordStore { records }
    }
}

impl FromIterator<PositionRecord> for RecordStore {
    fn from_iter<I: IntoIterator<Item = PositionRecord>>(iter: I) -> Self {
        RecordStore::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a PositionRecord;
    type IntoIter = std::slice::Iter<'a, PositionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
