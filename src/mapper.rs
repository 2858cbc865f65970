//! Row materialization
//!
//! Scalars take the single-column fast path. Entities start from
//! `Default::default()` and receive every column that names a writable member.

use std::any::type_name;

use crate::dynamic::DynamicRow;
use crate::entity::Entity;
use crate::entity::FromRecord;
use crate::error::Error;
use crate::error::Result;
use crate::metadata::SetError;
use crate::metadata::metadata;
use crate::record::Record;
use crate::value::FromValue;
use crate::value::Value;
use crate::value::render;

/// Builds a `T` from one row
pub fn to_object<T: FromRecord>(record: &Record) -> Result<T> {
    T::from_record(record)
}

pub fn to_dynamic(record: &Record) -> DynamicRow {
    DynamicRow::from_record(record)
}

/// Single-column rows convert directly; any other width converts null
pub fn map_scalar<T: FromValue>(record: &Record) -> Result<T> {
    match record.values() {
        [value] => T::from_value(value.clone()),
        _ => T::from_value(Value::Null),
    }
}

/// Member-by-member mapping through the cached metadata of `T`
pub fn map_entity<T: Entity>(record: &Record) -> Result<T> {
    let metadata = metadata::<T>();
    let mut item = T::default();
    let mut assigned = 0usize;

    for (column, value) in record.iter() {
        let Some(member) = metadata.get(column) else {
            continue;
        };

        match member.set(&mut item, value.clone()) {
            Ok(true) => assigned += 1,
            Ok(false) => {}
            Err(SetError::Conversion(error)) => return Err(error),
            Err(SetError::Rejected(source)) => {
                return Err(Error::MemberAssignment {
                    kind: member.kind(),
                    member: member.name().to_string(),
                    declared_type: member.declared_type(),
                    owner: type_name::<T>(),
                    value: render(value),
                    source,
                });
            }
        }
    }

    if assigned == 0 {
        if let [value] = record.values() {
            return T::from_scalar(value.clone());
        }
    }

    Ok(item)
}

macro_rules! impl_scalar_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromRecord for $ty {
                fn from_record(record: &Record) -> Result<Self> {
                    map_scalar(record)
                }
            }
        )*
    };
}

impl_scalar_record!(i8, i16, i32, i64, u8, u16, u32, f32, f64, bool, String, Vec<u8>, Value);

#[cfg(feature = "with-chrono")]
impl_scalar_record!(chrono::NaiveDateTime, chrono::NaiveDate, chrono::NaiveTime, chrono::DateTime<chrono::Utc>);

#[cfg(feature = "with-uuid")]
impl_scalar_record!(uuid::Uuid);

#[cfg(feature = "with-json")]
impl_scalar_record!(serde_json::Value);

impl<T: FromValue> FromRecord for Option<T> {
    fn from_record(record: &Record) -> Result<Self> {
        map_scalar(record)
    }
}

impl FromRecord for DynamicRow {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(to_dynamic(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::metadata::MemberDescriptor;
    use crate::metadata::MemberKind;
    use crate::metadata::TypeMetadata;

    fn record(columns: &[&str], values: Vec<Value>) -> Record {
        Record::new(columns.iter().map(|c| c.to_string()).collect::<Vec<_>>().into(), values)
    }

    #[derive(Debug, Default, PartialEq, crate::Entity)]
    #[dal(rename_all = "PascalCase")]
    struct Customer {
        customer_id: Option<i64>,
        first_name:  String,
        last_name:   String,
        age:         i32,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        number:  String,
        balance: i64,
        status:  String,
    }

    fn positive(item: &mut Account, value: i64) -> std::result::Result<(), BoxError> {
        if value < 0 {
            return Err("balance cannot be negative".into());
        }
        item.balance = value;
        Ok(())
    }

    impl Entity for Account {
        fn describe() -> TypeMetadata<Self> {
            TypeMetadata::builder("Account")
                .member(MemberDescriptor::property("Balance", |a: &Account| -> i64 { a.balance }, positive))
                .member(MemberDescriptor::read_only("Status", |a: &Account| -> String { a.status.clone() }))
                .member(MemberDescriptor::field(
                    "Number",
                    |a: &Account| -> String { a.number.clone() },
                    |a: &mut Account, v: String| a.number = v,
                ))
                .build()
        }

        fn from_scalar(value: Value) -> Result<Self> {
            Ok(Account { number: String::from_value(value)?, ..Default::default() })
        }
    }

    impl FromRecord for Account {
        fn from_record(record: &Record) -> Result<Self> {
            map_entity(record)
        }
    }

    #[test]
    fn test_maps_columns_case_insensitively() {
        let row = record(&["customerid", "FIRSTNAME", "LastName"], vec![
            Value::Integer(1),
            Value::Text("Clark".into()),
            Value::Text("Kent".into()),
        ]);
        let customer: Customer = to_object(&row).unwrap();
        assert_eq!(customer, Customer {
            customer_id: Some(1),
            first_name:  "Clark".into(),
            last_name:   "Kent".into(),
            age:         0,
        });
    }

    #[test]
    fn test_unknown_columns_are_skipped() {
        let row = record(&["FirstName", "Unknown"], vec![Value::Text("Lois".into()), Value::Integer(9)]);
        let customer: Customer = to_object(&row).unwrap();
        assert_eq!(customer.first_name, "Lois");
    }

    #[test]
    fn test_null_into_non_nullable_member_is_zero() {
        let row = record(&["Age", "CustomerId"], vec![Value::Null, Value::Null]);
        let customer: Customer = to_object(&row).unwrap();
        assert_eq!(customer.age, 0);
        assert_eq!(customer.customer_id, None);
    }

    #[test]
    fn test_conversion_failure_is_a_type_conversion_error() {
        let row = record(&["Age"], vec![Value::Text("old".into())]);
        let err = to_object::<Customer>(&row).unwrap_err();
        match err {
            Error::TypeConversion { value, target, .. } => {
                assert_eq!(value, "old");
                assert_eq!(target, "i32");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_property_conversion_failure_is_not_an_assignment_error() {
        let row = record(&["Balance"], vec![Value::Text("plenty".into())]);
        assert!(matches!(to_object::<Account>(&row), Err(Error::TypeConversion { target: "i64", .. })));
    }

    #[test]
    fn test_setter_failure_is_a_property_assignment_error() {
        let row = record(&["Balance", "Number"], vec![Value::Integer(-5), Value::Text("A-1".into())]);
        let err = to_object::<Account>(&row).unwrap_err();
        match err {
            Error::MemberAssignment { kind, member, declared_type, owner, value, source } => {
                assert_eq!(kind, MemberKind::Property);
                assert_eq!(member, "Balance");
                assert_eq!(declared_type, "i64");
                assert!(owner.ends_with("Account"));
                assert_eq!(value, "-5");
                assert_eq!(source.to_string(), "balance cannot be negative");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_only_members_are_not_assigned() {
        let row = record(&["Status", "Balance"], vec![Value::Text("closed".into()), Value::Integer(10)]);
        let account: Account = to_object(&row).unwrap();
        assert_eq!(account.status, "");
        assert_eq!(account.balance, 10);
    }

    #[test]
    fn test_single_unmatched_column_falls_back_to_scalar() {
        let row = record(&["AccountNumber"], vec![Value::Text("X-42".into())]);
        let account: Account = to_object(&row).unwrap();
        assert_eq!(account.number, "X-42");
    }

    #[test]
    fn test_single_unmatched_column_without_scalar_conversion_fails() {
        let row = record(&["Total"], vec![Value::Integer(3)]);
        assert!(matches!(to_object::<Customer>(&row), Err(Error::TypeConversion { .. })));
    }

    #[test]
    fn test_scalar_fast_path() {
        assert_eq!(to_object::<i64>(&record(&["COUNT(*)"], vec![Value::Integer(12)])).unwrap(), 12);
        assert_eq!(to_object::<String>(&record(&["Name"], vec![Value::Text("Bruce".into())])).unwrap(), "Bruce");
        assert_eq!(to_object::<Option<i64>>(&record(&["x"], vec![Value::Null])).unwrap(), None);
    }

    #[test]
    fn test_scalar_from_wide_row_is_default() {
        let row = record(&["A", "B"], vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(to_object::<i64>(&row).unwrap(), 0);
    }

    #[test]
    fn test_to_dynamic() {
        let row = record(&["Id", "Name"], vec![Value::Integer(1), Value::Null]);
        let dynamic = to_dynamic(&row);
        assert_eq!(dynamic["id"], Value::Integer(1));
        assert_eq!(dynamic.get("Name"), None);
        assert!(dynamic.contains_key("name"));
    }
}
