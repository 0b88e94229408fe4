mod data_record;
pub use data_record::DataRecord;

mod factory;
pub use factory::{BeanListFactory, FromRecord, ListFactory, RecordListFactory};

mod record_data;
pub use record_data::{Field, FromValue, RecordData};

#[allow(clippy::module_inception)]
mod record;
pub use record::{Record, RecordState};
