//! Entity mappings and the binder that names their tables, columns and
//! constraints through an [`ImplicitNamingStrategy`](crate::ImplicitNamingStrategy).

pub mod binder;
pub mod model;
pub mod schema;

pub use binder::SchemaBinder;
pub use model::{
    AttributeKind, AttributeMapping, CollectionKind, EntityMapping, IdMapping,
    InheritanceMapping, InheritanceStrategy,
};
pub use schema::{Column, ColumnRole, ForeignKey, Index, Schema, Table, UniqueKey};

use crate::error::NamingError;

/// Errors raised while binding entity mappings.
#[derive(Debug)]
pub enum MappingError {
    DuplicateEntity(String),
    UnknownEntity(String),
    MissingIdentifier(String),
    MissingTarget { entity: String, attribute: String },
    UnknownAttribute { entity: String, attribute: String },
    InheritanceCycle(String),
    Naming(NamingError),
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::DuplicateEntity(class) => write!(f, "Entity mapped twice: {class}"),
            MappingError::UnknownEntity(name) => write!(f, "Unknown entity: {name}"),
            MappingError::MissingIdentifier(class) => {
                write!(f, "Entity {class} has no identifier attribute")
            }
            MappingError::MissingTarget { entity, attribute } => {
                write!(f, "Association {entity}.{attribute} has no target entity")
            }
            MappingError::UnknownAttribute { entity, attribute } => {
                write!(f, "Entity {entity} has no attribute '{attribute}'")
            }
            MappingError::InheritanceCycle(class) => {
                write!(f, "Inheritance cycle through {class}")
            }
            MappingError::Naming(err) => write!(f, "Naming error: {err}"),
        }
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MappingError::Naming(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NamingError> for MappingError {
    fn from(err: NamingError) -> Self {
        MappingError::Naming(err)
    }
}
