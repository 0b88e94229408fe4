use crate::{DataType, Error, Result};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::str::FromStr;

/// A literal value bound to a command or read from a row.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// Fixed point decimal
    Decimal(Decimal),

    String(String),

    /// Calendar date
    Date(NaiveDate),

    /// Date and time without a time zone
    DateTime(NaiveDateTime),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// The database's current date or timestamp, resolved by the server.
    SysDate,

    /// A list of values, used as the argument of IN and BETWEEN.
    List(Vec<Value>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for null, the empty string and the empty list.
    ///
    /// Comparisons against an empty value become `IS NULL` checks.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    /// Name of the variant, used in conversion errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::I64(_) => "I64",
            Self::F64(_) => "F64",
            Self::Decimal(_) => "Decimal",
            Self::String(_) => "String",
            Self::Date(_) => "Date",
            Self::DateTime(_) => "DateTime",
            Self::Bytes(_) => "Bytes",
            Self::SysDate => "SysDate",
            Self::List(_) => "List",
        }
    }

    /// The data type a literal of this kind is rendered as when no column
    /// type is known.
    pub fn infer_data_type(&self) -> DataType {
        match self {
            Self::Bool(_) => DataType::Bool,
            Self::I64(_) => DataType::Integer,
            Self::F64(_) => DataType::Double,
            Self::Decimal(_) => DataType::Decimal,
            Self::String(_) => DataType::Text,
            Self::Date(_) => DataType::Date,
            Self::DateTime(_) | Self::SysDate => DataType::DateTime,
            Self::Bytes(_) => DataType::Blob,
            Self::List(items) => items
                .first()
                .map(Value::infer_data_type)
                .unwrap_or(DataType::Unknown),
            Self::Null => DataType::Unknown,
        }
    }

    pub fn to_i64(&self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(*v),
            Self::Bool(v) => Ok(*v as i64),
            Self::F64(v) if v.fract() == 0.0 => Ok(*v as i64),
            Self::Decimal(v) if v.fract().is_zero() => v
                .to_i64()
                .ok_or_else(|| Error::type_conversion(self.clone(), "i64")),
            Self::String(s) => s
                .trim()
                .parse()
                .map_err(|_| Error::type_conversion(self.clone(), "i64")),
            _ => Err(Error::type_conversion(self.clone(), "i64")),
        }
    }

    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Self::F64(v) => Ok(*v),
            Self::I64(v) => Ok(*v as f64),
            Self::Decimal(v) => v
                .to_f64()
                .ok_or_else(|| Error::type_conversion(self.clone(), "f64")),
            Self::String(s) => s
                .trim()
                .parse()
                .map_err(|_| Error::type_conversion(self.clone(), "f64")),
            _ => Err(Error::type_conversion(self.clone(), "f64")),
        }
    }

    pub fn to_decimal(&self) -> Result<Decimal> {
        match self {
            Self::Decimal(v) => Ok(*v),
            Self::I64(v) => Ok(Decimal::from(*v)),
            Self::F64(v) => Decimal::try_from(*v)
                .map_err(|_| Error::type_conversion(self.clone(), "Decimal")),
            Self::String(s) => Decimal::from_str(s.trim())
                .map_err(|_| Error::type_conversion(self.clone(), "Decimal")),
            _ => Err(Error::type_conversion(self.clone(), "Decimal")),
        }
    }

    /// Converts to a boolean. Strings are true for `1`, `true` and `y`,
    /// compared case-insensitively.
    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            Self::I64(v) => Ok(*v != 0),
            Self::String(s) => Ok(string_to_bool(s)),
            _ => Err(Error::type_conversion(self.clone(), "bool")),
        }
    }

    pub fn to_text(&self) -> Result<String> {
        match self {
            Self::String(s) => Ok(s.clone()),
            Self::Null | Self::Bytes(_) | Self::List(_) | Self::SysDate => {
                Err(Error::type_conversion(self.clone(), "String"))
            }
            other => Ok(other.to_string()),
        }
    }

    pub fn to_date(&self) -> Result<NaiveDate> {
        match self {
            Self::Date(v) => Ok(*v),
            Self::DateTime(v) => Ok(v.date()),
            Self::String(s) => parse_date(s)
                .or_else(|| parse_datetime(s).map(|dt| dt.date()))
                .ok_or_else(|| Error::type_conversion(self.clone(), "NaiveDate")),
            _ => Err(Error::type_conversion(self.clone(), "NaiveDate")),
        }
    }

    pub fn to_datetime(&self) -> Result<NaiveDateTime> {
        match self {
            Self::DateTime(v) => Ok(*v),
            Self::Date(v) => Ok(v.and_time(chrono::NaiveTime::MIN)),
            Self::String(s) => parse_datetime(s)
                .or_else(|| parse_date(s).map(|d| d.and_time(chrono::NaiveTime::MIN)))
                .ok_or_else(|| Error::type_conversion(self.clone(), "NaiveDateTime")),
            _ => Err(Error::type_conversion(self.clone(), "NaiveDateTime")),
        }
    }

    /// Converts the value into the representation used for the given column
    /// type. Null stays null, and `SysDate` stays `SysDate` for date columns
    /// so the database clock fills it in.
    pub fn convert_to(&self, data_type: DataType) -> Result<Value> {
        if self.is_null() {
            return Ok(Value::Null);
        }

        if let Value::SysDate = self {
            if data_type.is_date() {
                return Ok(Value::SysDate);
            }
        }

        Ok(match data_type {
            DataType::Integer | DataType::AutoInc => Value::I64(self.to_i64()?),
            DataType::Double => Value::F64(self.to_f64()?),
            DataType::Decimal => Value::Decimal(self.to_decimal()?),
            DataType::Bool => Value::Bool(self.to_bool()?),
            DataType::Date => Value::Date(self.to_date()?),
            DataType::DateTime => Value::DateTime(self.to_datetime()?),
            DataType::Text | DataType::Char | DataType::Clob => Value::String(self.to_text()?),
            DataType::Blob | DataType::Unknown => self.clone(),
        })
    }
}

pub(crate) fn string_to_bool(s: &str) -> bool {
    s == "1" || s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("y")
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Self::SysDate => f.write_str("sysdate"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    core::fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_value_from {
    ($ty:ty, $name:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::$name(value.into())
            }
        }
    };
}

impl_value_from!(bool, Bool);
impl_value_from!(i32, I64);
impl_value_from!(i64, I64);
impl_value_from!(u32, I64);
impl_value_from!(f32, F64);
impl_value_from!(f64, F64);
impl_value_from!(Decimal, Decimal);
impl_value_from!(String, String);
impl_value_from!(&str, String);
impl_value_from!(Vec<u8>, Bytes);

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.to_i64()
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.to_text()
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.to_bool()
    }
}
