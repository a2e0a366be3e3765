use crate::error::NamingError;
use crate::identifier::Identifier;
use crate::source::{
    AnyDiscriminatorColumnNameSource, AnyKeyColumnNameSource, BasicColumnNameSource,
    CollectionTableNameSource, DiscriminatorColumnNameSource, EntityNameSource,
    ForeignKeyNameSource, IdentifierColumnNameSource, IndexColumnNameSource, IndexNameSource,
    JoinColumnNameSource, JoinTableNameSource, MapKeyColumnNameSource,
    PrimaryKeyJoinColumnNameSource, TenantIdColumnNameSource, UniqueKeyNameSource,
};

/// Derives database identifiers for mapped objects that have no explicit name.
///
/// Implementations must be pure functions of their inputs so a single
/// strategy can be shared across threads.
pub trait ImplicitNamingStrategy: Send + Sync {
    fn determine_primary_table_name(
        &self,
        source: &EntityNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_join_table_name(
        &self,
        source: &JoinTableNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_collection_table_name(
        &self,
        source: &CollectionTableNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_discriminator_column_name(
        &self,
        source: &DiscriminatorColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_tenant_id_column_name(
        &self,
        source: &TenantIdColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_identifier_column_name(
        &self,
        source: &IdentifierColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_basic_column_name(
        &self,
        source: &BasicColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_join_column_name(
        &self,
        source: &JoinColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_primary_key_join_column_name(
        &self,
        source: &PrimaryKeyJoinColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_any_discriminator_column_name(
        &self,
        source: &AnyDiscriminatorColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_any_key_column_name(
        &self,
        source: &AnyKeyColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_map_key_column_name(
        &self,
        source: &MapKeyColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_list_index_column_name(
        &self,
        source: &IndexColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_foreign_key_name(
        &self,
        source: &ForeignKeyNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_unique_key_name(
        &self,
        source: &UniqueKeyNameSource<'_>,
    ) -> Result<Identifier, NamingError>;

    fn determine_index_name(
        &self,
        source: &IndexNameSource<'_>,
    ) -> Result<Identifier, NamingError>;
}
