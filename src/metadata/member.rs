use std::any::type_name;
use std::fmt;

use crate::error::BoxError;
use crate::error::Error;
use crate::value::FromValue;
use crate::value::IntoValue;
use crate::value::Value;

type Getter<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<(), SetError> + Send + Sync>;

/// Why [`MemberDescriptor::set`] failed
#[derive(Debug)]
pub enum SetError {
    /// The value could not be converted into the declared type
    Conversion(Error),
    /// The setter rejected the converted value
    Rejected(BoxError),
}

/// Whether a member was declared as a property or a plain field
///
/// Properties are enumerated before fields when metadata is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Field,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Property => f.write_str("property"),
            MemberKind::Field => f.write_str("field"),
        }
    }
}

/// One data slot of a type: its name, declared type and accessors
///
/// The getter turns the member into a [`Value`]; the setter, when present,
/// converts a [`Value`] into the declared type and stores it.
pub struct MemberDescriptor<T> {
    name:          String,
    declared_type: &'static str,
    kind:          MemberKind,
    getter:        Getter<T>,
    setter:        Option<Setter<T>>,
}

impl<T: 'static> MemberDescriptor<T> {
    /// A readable and writable field
    pub fn field<F, G, S>(name: impl Into<String>, get: G, set: S) -> Self
    where
        F: IntoValue + FromValue + 'static,
        G: Fn(&T) -> F + Send + Sync + 'static,
        S: Fn(&mut T, F) + Send + Sync + 'static,
    {
        Self {
            name:          name.into(),
            declared_type: type_name::<F>(),
            kind:          MemberKind::Field,
            getter:        Box::new(move |item| get(item).into_value()),
            setter:        Some(Box::new(move |item, value| {
                set(item, F::from_value(value).map_err(SetError::Conversion)?);
                Ok(())
            })),
        }
    }

    /// A property whose setter may reject the converted value
    pub fn property<F, G, S>(name: impl Into<String>, get: G, set: S) -> Self
    where
        F: IntoValue + FromValue + 'static,
        G: Fn(&T) -> F + Send + Sync + 'static,
        S: Fn(&mut T, F) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self {
            name:          name.into(),
            declared_type: type_name::<F>(),
            kind:          MemberKind::Property,
            getter:        Box::new(move |item| get(item).into_value()),
            setter:        Some(Box::new(move |item, value| {
                let converted = F::from_value(value).map_err(SetError::Conversion)?;
                set(item, converted).map_err(SetError::Rejected)
            })),
        }
    }

    /// A property without a setter; it is emitted but never assigned
    pub fn read_only<F, G>(name: impl Into<String>, get: G) -> Self
    where
        F: IntoValue + 'static,
        G: Fn(&T) -> F + Send + Sync + 'static,
    {
        Self {
            name:          name.into(),
            declared_type: type_name::<F>(),
            kind:          MemberKind::Property,
            getter:        Box::new(move |item| get(item).into_value()),
            setter:        None,
        }
    }
}

impl<T> MemberDescriptor<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &'static str {
        self.declared_type
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Reads the member from `item`
    pub fn get(&self, item: &T) -> Value {
        (self.getter)(item)
    }

    /// Converts `value` and stores it on `item`.
    ///
    /// Returns `Ok(false)` without touching `item` when the member is read-only.
    pub fn set(&self, item: &mut T, value: Value) -> Result<bool, SetError> {
        match &self.setter {
            Some(setter) => setter(item, value).map(|_| true),
            None => Ok(false),
        }
    }
}

impl<T> fmt::Debug for MemberDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("kind", &self.kind)
            .field("writable", &self.is_writable())
            .finish()
    }
}
