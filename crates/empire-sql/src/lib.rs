pub mod dbms;
pub use dbms::{DdlTypes, Dbms, Feature, Features, Handler, HandlerConfig};

pub mod ddl;
pub use ddl::{DdlAction, DdlGenerator, DdlObject, SqlScript};

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};
