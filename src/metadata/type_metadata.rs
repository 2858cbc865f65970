use std::collections::HashMap;
use std::collections::HashSet;

use super::EntityName;
use super::MemberDescriptor;
use super::MemberKind;
use super::fold_name;
use crate::value::Value;

/// Ordered, case-insensitive member table for one type
///
/// Properties come before fields, each group in registration order. A later
/// registration under an existing name replaces the earlier one in place.
pub struct TypeMetadata<T> {
    type_name: Option<&'static str>,
    schema:    Option<String>,
    table:     Option<String>,
    members:   Vec<MemberDescriptor<T>>,
    index:     HashMap<String, usize>,
    excluded:  HashSet<String>,
}

impl<T> TypeMetadata<T> {
    pub fn builder(type_name: &'static str) -> TypeMetadataBuilder<T> {
        TypeMetadataBuilder::new(Some(type_name))
    }

    /// Builder for a shape without a usable type name
    pub fn anonymous() -> TypeMetadataBuilder<T> {
        TypeMetadataBuilder::new(None)
    }

    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    pub fn is_anonymous(&self) -> bool {
        self.type_name.is_none()
    }

    /// Resolves the target name from the naming marker, falling back to the type name
    pub fn entity_name(&self) -> Option<EntityName> {
        let table = self.table.as_deref().or(self.type_name)?;
        Some(match &self.schema {
            Some(schema) => EntityName::with_schema(schema.as_str(), table),
            None => EntityName::new(table),
        })
    }

    pub fn members(&self) -> &[MemberDescriptor<T>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MemberDescriptor<T>> {
        self.index.get(&fold_name(name)).map(|&idx| &self.members[idx])
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(&fold_name(name))
    }

    pub fn column_value_pairs(&self, item: &T) -> Vec<(String, Value)> {
        self.members.iter().map(|member| (member.name().to_string(), member.get(item))).collect()
    }
}

impl<T> std::fmt::Debug for TypeMetadata<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeMetadata")
            .field("type_name", &self.type_name)
            .field("schema", &self.schema)
            .field("table", &self.table)
            .field("members", &self.members)
            .finish()
    }
}

pub struct TypeMetadataBuilder<T> {
    type_name:  Option<&'static str>,
    schema:     Option<String>,
    table:      Option<String>,
    properties: Vec<MemberDescriptor<T>>,
    fields:     Vec<MemberDescriptor<T>>,
    excluded:   Vec<String>,
}

impl<T> TypeMetadataBuilder<T> {
    fn new(type_name: Option<&'static str>) -> Self {
        Self {
            type_name,
            schema: None,
            table: None,
            properties: Vec::new(),
            fields: Vec::new(),
            excluded: Vec::new(),
        }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        let schema = schema.into();
        self.schema = if schema.trim().is_empty() { None } else { Some(schema) };
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        self.table = if table.trim().is_empty() { None } else { Some(table) };
        self
    }

    pub fn member(mut self, member: MemberDescriptor<T>) -> Self {
        match member.kind() {
            MemberKind::Property => self.properties.push(member),
            MemberKind::Field => self.fields.push(member),
        }
        self
    }

    /// Excluded members are never read, written or emitted
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.push(name.into());
        self
    }

    pub fn build(self) -> TypeMetadata<T> {
        let excluded: HashSet<String> = self.excluded.iter().map(|name| fold_name(name)).collect();
        let mut members: Vec<MemberDescriptor<T>> = Vec::new();
        let mut index = HashMap::new();

        for member in self.properties.into_iter().chain(self.fields) {
            let key = fold_name(member.name());
            if excluded.contains(&key) {
                continue;
            }
            match index.get(&key) {
                Some(&existing) => members[existing] = member,
                None => {
                    index.insert(key, members.len());
                    members.push(member);
                }
            }
        }

        TypeMetadata {
            type_name: self.type_name,
            schema: self.schema,
            table: self.table,
            members,
            index,
            excluded,
        }
    }
}
