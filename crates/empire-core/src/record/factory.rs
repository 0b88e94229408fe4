use super::{DataRecord, RecordData};
use crate::Result;

use std::marker::PhantomData;

/// Builds a value from the current row of a record source.
///
/// This is the explicit mapping that replaces reflection based bean
/// population.
pub trait FromRecord: Sized {
    fn from_record<R: RecordData + ?Sized>(record: &R) -> Result<Self>;
}

impl FromRecord for DataRecord {
    fn from_record<R: RecordData + ?Sized>(record: &R) -> Result<Self> {
        Ok(DataRecord::snapshot(record))
    }
}

/// Creates list items while rows are read.
pub trait ListFactory<T> {
    /// Called once before the first row.
    fn prepare(&mut self, _capacity: usize) {}

    fn new_item<R: RecordData + ?Sized>(&mut self, row: usize, record: &R) -> Result<T>;

    /// Called once after the last row.
    fn complete(&mut self) {}
}

/// Snapshots each row into a [`DataRecord`].
#[derive(Debug, Default)]
pub struct RecordListFactory;

impl ListFactory<DataRecord> for RecordListFactory {
    fn new_item<R: RecordData + ?Sized>(&mut self, _row: usize, record: &R) -> Result<DataRecord> {
        Ok(DataRecord::snapshot(record))
    }
}

/// Maps each row through [`FromRecord`].
#[derive(Debug)]
pub struct BeanListFactory<T> {
    _p: PhantomData<fn() -> T>,
}

impl<T> BeanListFactory<T> {
    pub fn new() -> Self {
        Self { _p: PhantomData }
    }
}

impl<T> Default for BeanListFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromRecord> ListFactory<T> for BeanListFactory<T> {
    fn new_item<R: RecordData + ?Sized>(&mut self, _row: usize, record: &R) -> Result<T> {
        T::from_record(record)
    }
}
