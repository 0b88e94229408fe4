use chrono::{NaiveDate, NaiveDateTime};

use crate::{Error, Value};

macro_rules! chrono_conversions {
    ($chrono:ty, $variant:ident, $convert:ident) => {
        impl From<$chrono> for Value {
            fn from(value: $chrono) -> Self {
                Value::$variant(value)
            }
        }

        /// Accepts either date variant and ISO text.
        impl TryFrom<Value> for $chrono {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self, Error> {
                value.$convert()
            }
        }
    };
}

chrono_conversions!(NaiveDate, Date, to_date);
chrono_conversions!(NaiveDateTime, DateTime, to_datetime);
