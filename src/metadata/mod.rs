//! Per-type member metadata and the process-wide metadata cache
//!
//! Metadata for a type is built once from [`Entity::describe`] on first use and
//! shared for the rest of the process. The cache is append-only.

mod entity_name;
mod member;
mod type_metadata;

use std::any::Any;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::LazyLock;

pub use entity_name::EntityName;
pub use member::MemberDescriptor;
pub use member::MemberKind;
pub use member::SetError;
use parking_lot::RwLock;
pub use type_metadata::TypeMetadata;
pub use type_metadata::TypeMetadataBuilder;

use crate::entity::ColumnSource;
use crate::entity::Entity;
use crate::value::Value;

type CachedMetadata = Arc<dyn Any + Send + Sync>;

static CACHE: LazyLock<RwLock<HashMap<TypeId, CachedMetadata>>> = LazyLock::new(|| RwLock::new(HashMap::new()));

/// Returns the cached metadata for `T`, describing the type on first request
pub fn metadata<T: Entity>() -> Arc<TypeMetadata<T>> {
    let key = TypeId::of::<T>();

    if let Some(cached) = CACHE.read().get(&key).cloned() {
        if let Ok(metadata) = cached.downcast::<TypeMetadata<T>>() {
            return metadata;
        }
    }

    // Built outside the lock; if another caller got there first its entry wins.
    let built = Arc::new(T::describe());
    tracing::trace!(type_name = std::any::type_name::<T>(), members = built.len(), "Caching type metadata");

    let cached = CACHE.write().entry(key).or_insert_with(|| built.clone() as CachedMetadata).clone();
    cached.downcast::<TypeMetadata<T>>().unwrap_or(built)
}

/// The case-insensitive form every member, column and entry name is compared by
pub(crate) fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a == b || fold_name(a) == fold_name(b)
}

/// Number of types described so far
pub fn cached_type_count() -> usize {
    CACHE.read().len()
}

/// Ordered (name, value) pairs for every member of `item`
pub fn column_value_pairs<S: ColumnSource + ?Sized>(item: &S) -> Vec<(String, Value)> {
    item.column_value_pairs()
}
