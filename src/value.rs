//! Value types and conversions for tursodal
//!
//! Every conversion treats [`Value::Null`] as an absent value: a nullable target
//! (`Option<T>`) becomes `None`, any other target receives its zero value.

use std::any::type_name;

pub use turso::Value;

use crate::error::BoxError;
use crate::error::Error;
use crate::error::Result;
use crate::metadata::same_name;

/// Column types supported by the data access layer
///
/// These types map to SQLite's type affinity system and are used as the
/// explicit type of a bound parameter:
/// - `Integer` maps to INTEGER (64-bit signed)
/// - `Float` maps to REAL (64-bit floating point)
/// - `Text` maps to TEXT (UTF-8 string)
/// - `Blob` maps to BLOB (binary data)
/// - `Null` maps to NULL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit signed integer (SQLite INTEGER)
    Integer,
    /// 64-bit floating point number (SQLite REAL)
    Float,
    /// UTF-8 text string (SQLite TEXT)
    Text,
    /// Binary data (SQLite BLOB)
    Blob,
    /// Null value (SQLite NULL)
    Null,
}

impl ColumnType {
    /// Coerces `value` into this column type. Null passes through untouched.
    pub fn coerce(self, value: Value) -> Result<Value> {
        if matches!(value, Value::Null) {
            return Ok(Value::Null);
        }

        match self {
            ColumnType::Integer => i64::from_value(value).map(Value::Integer),
            ColumnType::Float => f64::from_value(value).map(Value::Real),
            ColumnType::Text => String::from_value(value).map(Value::Text),
            ColumnType::Blob => match value {
                Value::Text(s) => Ok(Value::Blob(s.into_bytes())),
                other => Vec::<u8>::from_value(other).map(Value::Blob),
            },
            ColumnType::Null => Ok(Value::Null),
        }
    }
}

/// Trait for converting Rust types into database values
///
/// # Example
///
/// ```ignore
/// use tursodal::IntoValue;
///
/// let value: Value = 42i64.into_value();
/// let text: Value = "hello".into_value();
/// ```
pub trait IntoValue {
    /// Convert this value into a database [`Value`]
    fn into_value(self) -> Value;
}

/// Trait for converting database values into Rust types
///
/// # Example
///
/// ```ignore
/// use tursodal::{FromValue, Value};
///
/// let num: i64 = i64::from_value(Value::Text("42".into()))?;
/// let zero: i64 = i64::from_value(Value::Null)?;
/// ```
pub trait FromValue: Sized {
    /// Convert a database [`Value`] into this type
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConversion`] carrying the rejected value and the
    /// target type name.
    fn from_value(value: Value) -> Result<Self>;
}

/// Converts `value` into `T`
pub fn convert<T: FromValue>(value: Value) -> Result<T> {
    T::from_value(value)
}

/// Renders a value for error messages and annotated command text
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

fn integer_of(value: &Value) -> std::result::Result<i64, BoxError> {
    match value {
        Value::Null => Ok(0),
        Value::Integer(v) => Ok(*v),
        Value::Real(v) => {
            let rounded = v.round_ties_even();
            if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
                Ok(rounded as i64)
            } else {
                Err(format!("{} is outside the range of a 64-bit integer", v).into())
            }
        }
        Value::Text(s) => Ok(s.trim().parse::<i64>()?),
        Value::Blob(_) => Err("a blob cannot be converted to a number".into()),
    }
}

fn real_of(value: &Value) -> std::result::Result<f64, BoxError> {
    match value {
        Value::Null => Ok(0.0),
        Value::Integer(v) => Ok(*v as f64),
        Value::Real(v) => Ok(*v),
        Value::Text(s) => Ok(s.trim().parse::<f64>()?),
        Value::Blob(_) => Err("a blob cannot be converted to a number".into()),
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Integer(i64::from(self))
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    integer_of(&value)
                        .and_then(|wide| <$ty>::try_from(wide).map_err(BoxError::from))
                        .map_err(|e| Error::conversion(&value, type_name::<$ty>(), e))
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32);

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Real(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        real_of(&value).map_err(|e| Error::conversion(&value, "f64", e))
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Real(f64::from(self))
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        real_of(&value).map(|v| v as f32).map_err(|e| Error::conversion(&value, "f32", e))
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Integer(if self { 1 } else { 0 })
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Null => Ok(false),
            Value::Integer(v) => Ok(*v != 0),
            Value::Real(v) => Ok(*v != 0.0),
            Value::Text(s) => match s.trim() {
                t if t.eq_ignore_ascii_case("true") => Ok(true),
                t if t.eq_ignore_ascii_case("false") => Ok(false),
                _ => Err(Error::conversion(&value, "bool", "expected 'true' or 'false'")),
            },
            Value::Blob(_) => Err(Error::conversion(&value, "bool", "a blob cannot be converted to a boolean")),
        }
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoValue for &String {
    fn into_value(self) -> Value {
        Value::Text(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Text(s) => Ok(s),
            Value::Integer(v) => Ok(v.to_string()),
            Value::Real(v) => Ok(v.to_string()),
            other @ Value::Blob(_) => Err(Error::conversion(&other, "String", "a blob cannot be converted to text")),
        }
    }
}

impl IntoValue for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Blob(self)
    }
}

impl IntoValue for &[u8] {
    fn into_value(self) -> Value {
        Value::Blob(self.to_vec())
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Blob(b) => Ok(b),
            other => Err(Error::conversion(&other, "Vec<u8>", "only blobs convert to bytes")),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

/// Enumerations stored by variant name
///
/// Usually implemented with `#[derive(DbEnum)]`. Parsing is name based and
/// case-insensitive; a numeric string only matches a variant explicitly
/// renamed to that number.
pub trait DbEnum: Sized {
    /// Stored names, in declaration order
    const VARIANT_NAMES: &'static [&'static str];

    /// The stored name of this variant
    fn variant_name(&self) -> &'static str;

    /// Variant at `index` in declaration order
    fn from_index(index: usize) -> Option<Self>;

    /// The first declared variant, used for database null
    fn zero() -> Self;

    fn from_variant_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::VARIANT_NAMES.iter().position(|candidate| same_name(candidate, name)).and_then(Self::from_index)
    }
}

/// Parses a database value into a [`DbEnum`]
pub fn parse_enum<E: DbEnum>(value: Value) -> Result<E> {
    let target = type_name::<E>();
    let name = match &value {
        Value::Null => return Ok(E::zero()),
        Value::Text(s) => s.clone(),
        Value::Integer(v) => v.to_string(),
        Value::Real(_) | Value::Blob(_) => {
            return Err(Error::conversion(&value, target, "enumerations are stored by name"));
        }
    };

    E::from_variant_name(&name).ok_or_else(|| {
        Error::conversion(&value, target, format!("'{}' is not one of {:?}", name, E::VARIANT_NAMES))
    })
}

#[cfg(feature = "with-chrono")]
mod chrono_impl {
    use chrono::DateTime;
    use chrono::NaiveDate;
    use chrono::NaiveDateTime;
    use chrono::NaiveTime;
    use chrono::Utc;

    use super::*;

    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

    fn parse_datetime(s: &str) -> std::result::Result<NaiveDateTime, BoxError> {
        let s = s.trim();
        for format in DATETIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(parsed);
            }
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
            return Ok(parsed.naive_utc());
        }
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?.and_time(NaiveTime::MIN))
    }

    fn datetime_of(value: &Value) -> std::result::Result<NaiveDateTime, BoxError> {
        match value {
            Value::Null => Ok(NaiveDateTime::default()),
            Value::Text(s) => parse_datetime(s),
            Value::Integer(secs) => DateTime::from_timestamp(*secs, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| "timestamp out of range".into()),
            Value::Real(_) | Value::Blob(_) => Err("expected text or a unix timestamp".into()),
        }
    }

    impl IntoValue for NaiveDateTime {
        fn into_value(self) -> Value {
            Value::Text(self.format("%Y-%m-%d %H:%M:%S%.f").to_string())
        }
    }

    impl FromValue for NaiveDateTime {
        fn from_value(value: Value) -> Result<Self> {
            datetime_of(&value).map_err(|e| Error::conversion(&value, "NaiveDateTime", e))
        }
    }

    impl IntoValue for DateTime<Utc> {
        fn into_value(self) -> Value {
            Value::Text(self.to_rfc3339())
        }
    }

    impl FromValue for DateTime<Utc> {
        fn from_value(value: Value) -> Result<Self> {
            datetime_of(&value)
                .map(|ndt| DateTime::from_naive_utc_and_offset(ndt, Utc))
                .map_err(|e| Error::conversion(&value, "DateTime<Utc>", e))
        }
    }

    impl IntoValue for NaiveDate {
        fn into_value(self) -> Value {
            Value::Text(self.format("%Y-%m-%d").to_string())
        }
    }

    impl FromValue for NaiveDate {
        fn from_value(value: Value) -> Result<Self> {
            datetime_of(&value).map(|ndt| ndt.date()).map_err(|e| Error::conversion(&value, "NaiveDate", e))
        }
    }

    impl IntoValue for NaiveTime {
        fn into_value(self) -> Value {
            Value::Text(self.format("%H:%M:%S%.f").to_string())
        }
    }

    impl FromValue for NaiveTime {
        fn from_value(value: Value) -> Result<Self> {
            match &value {
                Value::Null => Ok(NaiveTime::MIN),
                Value::Text(s) => NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f")
                    .map_err(|e| Error::conversion(&value, "NaiveTime", e)),
                _ => Err(Error::conversion(&value, "NaiveTime", "expected text")),
            }
        }
    }
}

#[cfg(feature = "with-uuid")]
mod uuid_impl {
    use uuid::Uuid;

    use super::*;

    impl IntoValue for Uuid {
        fn into_value(self) -> Value {
            Value::Text(self.to_string())
        }
    }

    impl FromValue for Uuid {
        fn from_value(value: Value) -> Result<Self> {
            match &value {
                Value::Null => Ok(Uuid::nil()),
                Value::Text(s) => Uuid::parse_str(s.trim()).map_err(|e| Error::conversion(&value, "Uuid", e)),
                Value::Blob(b) => Uuid::from_slice(b).map_err(|e| Error::conversion(&value, "Uuid", e)),
                _ => Err(Error::conversion(&value, "Uuid", "expected text or a 16 byte blob")),
            }
        }
    }
}

#[cfg(feature = "with-json")]
pub use json_impl::Json;

#[cfg(feature = "with-json")]
mod json_impl {
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use serde_json::Value as JsonValue;

    use super::*;

    /// Wrapper type for values stored as JSON text
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Json<T>(pub T);

    impl<T: Serialize> Json<T> {
        /// Serializes the wrapped value, reporting failures such as non-string map keys
        pub fn to_text(&self) -> Result<String> {
            Ok(serde_json::to_string(&self.0)?)
        }
    }

    /// A value that cannot be serialized is stored as null and logged at error level;
    /// call [`Json::to_text`] first to handle the failure instead.
    impl<T: Serialize> IntoValue for Json<T> {
        fn into_value(self) -> Value {
            match self.to_text() {
                Ok(s) => Value::Text(s),
                Err(e) => {
                    tracing::error!(target_type = type_name::<T>(), error = %e, "JSON member could not be serialized, storing null");
                    Value::Null
                }
            }
        }
    }

    impl<T: DeserializeOwned + Default> FromValue for Json<T> {
        fn from_value(value: Value) -> Result<Self> {
            match &value {
                Value::Text(s) => serde_json::from_str(s).map(Json).map_err(|e| Error::conversion(&value, type_name::<T>(), e)),
                Value::Null => Ok(Json(T::default())),
                _ => Err(Error::conversion(&value, type_name::<T>(), "expected JSON text")),
            }
        }
    }

    impl IntoValue for JsonValue {
        fn into_value(self) -> Value {
            Value::Text(self.to_string())
        }
    }

    impl FromValue for JsonValue {
        fn from_value(value: Value) -> Result<Self> {
            match &value {
                Value::Text(s) => serde_json::from_str(s).map_err(|e| Error::conversion(&value, "serde_json::Value", e)),
                Value::Null => Ok(JsonValue::Null),
                _ => Err(Error::conversion(&value, "serde_json::Value", "expected JSON text")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, crate::DbEnum)]
    enum Level {
        One,
        Two,
        #[dal(rename = "3")]
        Three,
    }

    #[test]
    fn test_null_into_non_nullable_integer_is_zero() {
        assert_eq!(i32::from_value(Value::Null).unwrap(), 0);
        assert_eq!(i64::from_value(Value::Null).unwrap(), 0);
        assert_eq!(u8::from_value(Value::Null).unwrap(), 0);
    }

    #[test]
    fn test_null_into_other_defaults() {
        assert_eq!(f64::from_value(Value::Null).unwrap(), 0.0);
        assert!(!bool::from_value(Value::Null).unwrap());
        assert_eq!(String::from_value(Value::Null).unwrap(), "");
        assert!(Vec::<u8>::from_value(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_option_from_value() {
        assert_eq!(Option::<i64>::from_value(Value::Integer(42)).unwrap(), Some(42));
        assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<String>::from_value(Value::Text("x".into())).unwrap(), Some("x".to_string()));
    }

    #[test]
    fn test_integer_narrowing_is_checked() {
        assert_eq!(i8::from_value(Value::Integer(127)).unwrap(), 127);
        assert!(matches!(i8::from_value(Value::Integer(128)), Err(Error::TypeConversion { target: "i8", .. })));
        assert!(u32::from_value(Value::Integer(-1)).is_err());
    }

    #[test]
    fn test_integer_from_real_rounds_half_to_even() {
        assert_eq!(i64::from_value(Value::Real(2.5)).unwrap(), 2);
        assert_eq!(i64::from_value(Value::Real(3.5)).unwrap(), 4);
        assert_eq!(i64::from_value(Value::Real(-42.7)).unwrap(), -43);
        assert!(i64::from_value(Value::Real(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_integer_from_text() {
        assert_eq!(i64::from_value(Value::Text(" 42 ".into())).unwrap(), 42);

        let err = i64::from_value(Value::Text("hello".into())).unwrap_err();
        match err {
            Error::TypeConversion { value, target, .. } => {
                assert_eq!(value, "hello");
                assert_eq!(target, "i64");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_integer_from_blob_fails() {
        assert!(i64::from_value(Value::Blob(vec![1])).is_err());
    }

    #[test]
    fn test_float_conversions() {
        assert!((f64::from_value(Value::Integer(42)).unwrap() - 42.0).abs() < f64::EPSILON);
        assert!((f64::from_value(Value::Text("3.25".into())).unwrap() - 3.25).abs() < f64::EPSILON);
        assert!((f32::from_value(Value::Real(3.14)).unwrap() - 3.14).abs() < 0.01);
    }

    #[test]
    fn test_bool_conversions() {
        assert!(bool::from_value(Value::Integer(42)).unwrap());
        assert!(!bool::from_value(Value::Integer(0)).unwrap());
        assert!(bool::from_value(Value::Text("TRUE".into())).unwrap());
        assert!(!bool::from_value(Value::Text("false".into())).unwrap());
        assert!(bool::from_value(Value::Text("yes".into())).is_err());
    }

    #[test]
    fn test_string_conversions() {
        assert_eq!(String::from_value(Value::Integer(7)).unwrap(), "7");
        assert_eq!(String::from_value(Value::Real(1.5)).unwrap(), "1.5");
        assert!(String::from_value(Value::Blob(vec![0])).is_err());
    }

    #[test]
    fn test_bytes_only_from_blob() {
        assert_eq!(Vec::<u8>::from_value(Value::Blob(vec![1, 2, 3])).unwrap(), vec![1, 2, 3]);
        assert!(Vec::<u8>::from_value(Value::Text("abc".into())).is_err());
    }

    #[test]
    fn test_into_value() {
        assert_eq!(42i32.into_value(), Value::Integer(42));
        assert_eq!(7u8.into_value(), Value::Integer(7));
        assert_eq!(true.into_value(), Value::Integer(1));
        assert_eq!("hello".into_value(), Value::Text("hello".to_string()));
        assert_eq!(Some(3i64).into_value(), Value::Integer(3));
        assert_eq!(None::<i64>.into_value(), Value::Null);
        assert_eq!((&[1u8, 2][..]).into_value(), Value::Blob(vec![1, 2]));
    }

    #[test]
    fn test_convert_function() {
        let parsed: u16 = convert(Value::Text("65535".into())).unwrap();
        assert_eq!(parsed, 65535);
    }

    #[test]
    fn test_column_type_coerce() {
        assert_eq!(ColumnType::Integer.coerce(Value::Text("12".into())).unwrap(), Value::Integer(12));
        assert_eq!(ColumnType::Float.coerce(Value::Integer(2)).unwrap(), Value::Real(2.0));
        assert_eq!(ColumnType::Text.coerce(Value::Integer(2)).unwrap(), Value::Text("2".into()));
        assert_eq!(ColumnType::Blob.coerce(Value::Text("ab".into())).unwrap(), Value::Blob(vec![b'a', b'b']));
        assert_eq!(ColumnType::Integer.coerce(Value::Null).unwrap(), Value::Null);
        assert!(ColumnType::Integer.coerce(Value::Text("x".into())).is_err());
    }

    #[test]
    fn test_enum_parses_by_name_case_insensitively() {
        assert_eq!(Level::from_value(Value::Text("two".into())).unwrap(), Level::Two);
        assert_eq!(Level::from_value(Value::Text(" ONE ".into())).unwrap(), Level::One);
    }

    #[test]
    fn test_enum_numeric_string_is_not_an_ordinal() {
        let err = Level::from_value(Value::Text("2".into())).unwrap_err();
        assert!(matches!(err, Error::TypeConversion { .. }));
        assert!(Level::from_value(Value::Integer(1)).is_err());
    }

    #[test]
    fn test_enum_numeric_named_variant() {
        assert_eq!(Level::from_value(Value::Text("3".into())).unwrap(), Level::Three);
        assert_eq!(Level::from_value(Value::Integer(3)).unwrap(), Level::Three);
    }

    #[test]
    fn test_enum_null_is_first_variant() {
        assert_eq!(Level::from_value(Value::Null).unwrap(), Level::One);
        assert_eq!(Option::<Level>::from_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn test_enum_into_value_uses_name() {
        assert_eq!(Level::Two.into_value(), Value::Text("Two".into()));
        assert_eq!(Level::Three.into_value(), Value::Text("3".into()));
    }

    #[cfg(feature = "with-uuid")]
    #[test]
    fn test_uuid_from_text_and_bytes() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(uuid::Uuid::from_value(Value::Text(id.to_string())).unwrap(), id);
        assert_eq!(uuid::Uuid::from_value(Value::Blob(id.as_bytes().to_vec())).unwrap(), id);
        assert_eq!(uuid::Uuid::from_value(Value::Null).unwrap(), uuid::Uuid::nil());
        assert!(uuid::Uuid::from_value(Value::Blob(vec![1, 2, 3])).is_err());
    }

    #[cfg(feature = "with-chrono")]
    #[test]
    fn test_chrono_conversions() {
        use chrono::NaiveDate;
        use chrono::NaiveDateTime;

        let date = NaiveDate::from_ymd_opt(1938, 6, 18).unwrap();
        assert_eq!(NaiveDate::from_value(date.into_value()).unwrap(), date);

        let dt = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(NaiveDateTime::from_value(dt.into_value()).unwrap(), dt);
        assert_eq!(NaiveDateTime::from_value(Value::Text("1938-06-18T10:30:00".into())).unwrap(), dt);
        assert_eq!(NaiveDateTime::from_value(Value::Text("1938-06-18".into())).unwrap(), date.and_hms_opt(0, 0, 0).unwrap());
        assert!(NaiveDateTime::from_value(Value::Text("not a date".into())).is_err());
    }

    #[cfg(feature = "with-json")]
    #[test]
    fn test_json_wrapper() {
        let value = Json(vec![1, 2, 3]).into_value();
        assert_eq!(value, Value::Text("[1,2,3]".into()));
        let parsed = Json::<Vec<i32>>::from_value(value).unwrap();
        assert_eq!(parsed.0, vec![1, 2, 3]);
        assert_eq!(Json::<Option<i32>>::from_value(Value::Null).unwrap().0, None);
    }

    #[cfg(feature = "with-json")]
    #[test]
    fn test_json_null_is_the_default() {
        assert_eq!(Json::<Vec<i32>>::from_value(Value::Null).unwrap().0, Vec::<i32>::new());
        assert_eq!(serde_json::Value::from_value(Value::Null).unwrap(), serde_json::Value::Null);
    }

    #[cfg(feature = "with-json")]
    #[test]
    fn test_invalid_json_is_a_conversion_error() {
        let err = Json::<Vec<i32>>::from_value(Value::Text("[1, nope]".into())).unwrap_err();
        assert!(matches!(err, Error::TypeConversion { ref value, .. } if value == "[1, nope]"));

        let err = serde_json::Value::from_value(Value::Text("{".into())).unwrap_err();
        assert!(matches!(err, Error::TypeConversion { target: "serde_json::Value", .. }));
    }

    #[cfg(feature = "with-json")]
    #[test]
    fn test_unserializable_json_is_reported() {
        use std::collections::HashMap;

        let pairs = Json(HashMap::from([((1, 2), "tuple keys")]));
        assert!(matches!(pairs.to_text(), Err(Error::Json(_))));
        assert_eq!(pairs.into_value(), Value::Null);
    }
}
