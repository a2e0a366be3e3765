//! Naming sources: the read-only inputs handed to a naming strategy for
//! each naming event.
//!
//! Every source borrows its data from the caller together with the
//! [`BuildingContext`] of the mapping being built.

use std::fmt;

use crate::identifier::Identifier;
use crate::normalizer::BuildingContext;

/// Names under which an entity type is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNaming {
    /// Fully qualified type name, `.` or `::` separated.
    pub class_name: String,
    /// Entity name, usually the same as `class_name`.
    pub entity_name: String,
    /// Explicit entity name, takes precedence when not empty.
    pub jpa_entity_name: Option<String>,
}

impl EntityNaming {
    /// Naming for a type whose entity name is its class name.
    pub fn new(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        Self {
            entity_name: class_name.clone(),
            class_name,
            jpa_entity_name: None,
        }
    }

    pub fn with_jpa_entity_name(mut self, name: impl Into<String>) -> Self {
        self.jpa_entity_name = Some(name.into());
        self
    }
}

/// Strip the module/package qualifier off a type name.
pub fn unqualify(name: &str) -> &str {
    let after_path = name.rsplit("::").next().unwrap_or(name);
    after_path.rsplit('.').next().unwrap_or(after_path)
}

/// Dotted path to an attribute, e.g. `address.street`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePath {
    parent: Option<Box<AttributePath>>,
    property: String,
}

impl AttributePath {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            parent: None,
            property: property.into(),
        }
    }

    /// Parse a dotted path. Empty segments are skipped.
    pub fn parse(path: &str) -> Self {
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        let mut result = AttributePath::new(segments.next().unwrap_or_default());
        for segment in segments {
            result = result.append(segment);
        }
        result
    }

    pub fn append(self, property: impl Into<String>) -> Self {
        Self {
            parent: Some(Box::new(self)),
            property: property.into(),
        }
    }

    /// Last segment of the path.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn parent(&self) -> Option<&AttributePath> {
        self.parent.as_deref()
    }

    pub fn full_path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}.{}", parent.full_path(), self.property),
            None => self.property.clone(),
        }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// Why a join column is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinColumnNature {
    /// Owner key of a collection table.
    ElementCollection,
    /// Foreign key column of a to-one association.
    EntityAssociation,
    /// Either side of a join table.
    JoinTable,
}

#[derive(Debug, Clone, Copy)]
pub struct EntityNameSource<'a> {
    pub entity_naming: &'a EntityNaming,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct JoinTableNameSource<'a> {
    pub owning_physical_table_name: &'a str,
    pub owning_entity_naming: &'a EntityNaming,
    pub non_owning_physical_table_name: &'a str,
    pub non_owning_entity_naming: &'a EntityNaming,
    pub association_owning_attribute_path: &'a AttributePath,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct CollectionTableNameSource<'a> {
    pub owning_physical_table_name: &'a str,
    pub owning_entity_naming: &'a EntityNaming,
    pub owning_attribute_path: &'a AttributePath,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct DiscriminatorColumnNameSource<'a> {
    pub entity_naming: &'a EntityNaming,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct TenantIdColumnNameSource<'a> {
    pub entity_naming: &'a EntityNaming,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct IdentifierColumnNameSource<'a> {
    pub entity_naming: &'a EntityNaming,
    pub identifier_attribute_path: &'a AttributePath,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct BasicColumnNameSource<'a> {
    pub attribute_path: &'a AttributePath,
    pub collection_element: bool,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct JoinColumnNameSource<'a> {
    pub nature: JoinColumnNature,
    pub entity_naming: &'a EntityNaming,
    pub attribute_path: Option<&'a AttributePath>,
    pub referenced_table_name: &'a Identifier,
    pub referenced_column_name: &'a Identifier,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct PrimaryKeyJoinColumnNameSource<'a> {
    pub referenced_table_name: &'a Identifier,
    pub referenced_primary_key_column_name: &'a Identifier,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct AnyDiscriminatorColumnNameSource<'a> {
    pub attribute_path: &'a AttributePath,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct AnyKeyColumnNameSource<'a> {
    pub attribute_path: &'a AttributePath,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct MapKeyColumnNameSource<'a> {
    pub plural_attribute_path: &'a AttributePath,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexColumnNameSource<'a> {
    pub plural_attribute_path: &'a AttributePath,
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyNameSource<'a> {
    pub table_name: &'a Identifier,
    pub column_names: &'a [Identifier],
    pub referenced_table_name: &'a Identifier,
    pub referenced_column_names: &'a [Identifier],
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct UniqueKeyNameSource<'a> {
    pub table_name: &'a Identifier,
    pub column_names: &'a [Identifier],
    pub context: &'a BuildingContext,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexNameSource<'a> {
    pub table_name: &'a Identifier,
    pub column_names: &'a [Identifier],
    pub context: &'a BuildingContext,
}
