//! # k2-naming
//!
//! Implicit naming strategies for object-relational mappings.
//!
//! [`K2NamingStrategy`] wraps a base strategy and turns every derived name
//! from camel case into lower-case words separated by `_`
//! (`PurchaseOrder` -> `purchase_order`, `imageURL` -> `image_url`).
//! Foreign keys, unique keys and indexes get readable names such as
//! `fk_order_id_customer` instead of hashes.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifier`] | [`Identifier`]: name + quoting flag |
//! | [`source`] | naming sources handed to strategies |
//! | [`strategy`] | the [`ImplicitNamingStrategy`] trait |
//! | [`camel`] | camel-case tokenizer |
//! | [`jpa`], [`spring`] | base strategies |
//! | [`k2`] | the camel-case to snake-case strategy |
//! | [`normalizer`] | quoting rules and mapping defaults |
//! | [`mapping`] | entity mappings and the schema binder |
//! | [`config`] | YAML/environment configuration |

pub mod camel;
pub mod config;
pub mod error;
pub mod identifier;
pub mod jpa;
pub mod k2;
pub mod mapping;
pub mod normalizer;
pub mod source;
pub mod spring;
pub mod strategy;

pub use config::{BaseStrategy, ConfigError, NamingConfig};
pub use error::NamingError;
pub use identifier::Identifier;
pub use jpa::JpaCompliantNamingStrategy;
pub use k2::K2NamingStrategy;
pub use mapping::{EntityMapping, MappingError, Schema, SchemaBinder};
pub use normalizer::{BuildingContext, MappingDefaults, ObjectNameNormalizer};
pub use source::{
    AnyDiscriminatorColumnNameSource, AnyKeyColumnNameSource, AttributePath,
    BasicColumnNameSource, CollectionTableNameSource, DiscriminatorColumnNameSource,
    EntityNameSource, EntityNaming, ForeignKeyNameSource, IdentifierColumnNameSource,
    IndexColumnNameSource, IndexNameSource, JoinColumnNameSource, JoinColumnNature,
    JoinTableNameSource, MapKeyColumnNameSource, PrimaryKeyJoinColumnNameSource,
    TenantIdColumnNameSource, UniqueKeyNameSource,
};
pub use spring::SpringImplicitNamingStrategy;
pub use strategy::ImplicitNamingStrategy;

pub mod prelude {
    //! Re-exports of the most commonly used naming types.
    pub use crate::{
        BuildingContext, EntityMapping, Identifier, ImplicitNamingStrategy, K2NamingStrategy,
        NamingConfig, SchemaBinder,
    };
}
