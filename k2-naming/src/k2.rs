use std::fmt;

use tracing::trace;

use crate::camel::to_snake_case;
use crate::error::NamingError;
use crate::identifier::Identifier;
use crate::normalizer::BuildingContext;
use crate::source::{
    AnyDiscriminatorColumnNameSource, AnyKeyColumnNameSource, BasicColumnNameSource,
    CollectionTableNameSource, DiscriminatorColumnNameSource, EntityNameSource,
    ForeignKeyNameSource, IdentifierColumnNameSource, IndexColumnNameSource, IndexNameSource,
    JoinColumnNameSource, JoinTableNameSource, MapKeyColumnNameSource,
    PrimaryKeyJoinColumnNameSource, TenantIdColumnNameSource, UniqueKeyNameSource,
};
use crate::spring::SpringImplicitNamingStrategy;
use crate::strategy::ImplicitNamingStrategy;

/// Naming strategy that turns camel-case names into lower-case words
/// separated by `_`.
///
/// Every simple name is first derived by a base strategy (Spring's flavour
/// of the JPA rules unless another one is supplied) and then transformed.
/// Foreign keys, unique keys and indexes get readable names built from
/// their table and columns instead of hashes:
///
/// | object | raw name |
/// |--------|----------|
/// | foreign key | `fk_<table>_<sorted columns>_<referenced table>` |
/// | unique key | `uk_<table>_<columns>` |
/// | index | `idx_<columns>` |
///
/// Names can get long; databases with short identifier limits may reject them.
///
/// # Example
///
/// ```
/// use k2_naming::{BuildingContext, EntityNaming, EntityNameSource, ImplicitNamingStrategy, K2NamingStrategy};
///
/// let strategy = K2NamingStrategy::new();
/// let context = BuildingContext::default();
/// let naming = EntityNaming::new("com.acme.PurchaseOrder");
/// let table = strategy
///     .determine_primary_table_name(&EntityNameSource { entity_naming: &naming, context: &context })
///     .unwrap();
/// assert_eq!(table.text(), "purchase_order");
/// ```
pub struct K2NamingStrategy {
    delegate: Box<dyn ImplicitNamingStrategy>,
}

impl K2NamingStrategy {
    /// Strategy based on [`SpringImplicitNamingStrategy`].
    pub fn new() -> Self {
        Self::with_base(SpringImplicitNamingStrategy::new())
    }

    /// Strategy based on the given base strategy.
    pub fn with_base(base: impl ImplicitNamingStrategy + 'static) -> Self {
        Self::from_boxed(Box::new(base))
    }

    pub fn from_boxed(delegate: Box<dyn ImplicitNamingStrategy>) -> Self {
        Self { delegate }
    }

    /// Transform an identifier, keeping its quoting.
    pub fn apply(&self, name: Identifier) -> Identifier {
        let text = to_snake_case(name.text());
        trace!(from = %name.text(), to = %text, "implicit name transformed");
        Identifier::new(text, name.is_quoted())
    }

    /// Parse the assembled name, normalize its quoting and transform it.
    fn finish(
        &self,
        raw: &str,
        kind: &'static str,
        context: &BuildingContext,
    ) -> Result<Identifier, NamingError> {
        let identifier = Identifier::to_identifier(raw).ok_or(NamingError::BlankName { kind })?;
        Ok(self.apply(context.normalizer.normalize_identifier_quoting(identifier)))
    }
}

impl Default for K2NamingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for K2NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("K2NamingStrategy").finish_non_exhaustive()
    }
}

/// Raw foreign key name, before quoting and transformation.
///
/// Columns are sorted by canonical name. A column name starting with the
/// referenced table name loses that prefix, and the referenced table is
/// appended unless the main table name already starts with it.
pub fn raw_foreign_key_name(
    table: &Identifier,
    columns: &[Identifier],
    referenced_table: &Identifier,
) -> String {
    let main_table = table.text();
    let referenced = referenced_table.text();

    let mut sorted: Vec<&Identifier> = columns.iter().collect();
    sorted.sort();

    let mut name = format!("fk_{main_table}");
    for column in sorted {
        let fragment = column.text().strip_prefix(referenced).unwrap_or(column.text());
        name.push('_');
        name.push_str(fragment);
    }
    if !main_table.starts_with(referenced) {
        name.push('_');
        name.push_str(referenced);
    }
    name
}

/// Raw unique key name. Columns keep the order they were given in.
pub fn raw_unique_key_name(table: &Identifier, columns: &[Identifier]) -> String {
    let mut name = format!("uk_{}", table.text());
    for column in columns {
        name.push('_');
        name.push_str(column.text());
    }
    name
}

/// Raw index name. Columns keep the order they were given in.
pub fn raw_index_name(columns: &[Identifier]) -> String {
    let mut name = String::from("idx");
    for column in columns {
        name.push('_');
        name.push_str(column.text());
    }
    name
}

impl ImplicitNamingStrategy for K2NamingStrategy {
    fn determine_primary_table_name(
        &self,
        source: &EntityNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_primary_table_name(source)?))
    }

    fn determine_join_table_name(
        &self,
        source: &JoinTableNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_join_table_name(source)?))
    }

    fn determine_collection_table_name(
        &self,
        source: &CollectionTableNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_collection_table_name(source)?))
    }

    fn determine_discriminator_column_name(
        &self,
        source: &DiscriminatorColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_discriminator_column_name(source)?))
    }

    fn determine_tenant_id_column_name(
        &self,
        source: &TenantIdColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_tenant_id_column_name(source)?))
    }

    fn determine_identifier_column_name(
        &self,
        source: &IdentifierColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_identifier_column_name(source)?))
    }

    fn determine_basic_column_name(
        &self,
        source: &BasicColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_basic_column_name(source)?))
    }

    fn determine_join_column_name(
        &self,
        source: &JoinColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_join_column_name(source)?))
    }

    fn determine_primary_key_join_column_name(
        &self,
        source: &PrimaryKeyJoinColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_primary_key_join_column_name(source)?))
    }

    fn determine_any_discriminator_column_name(
        &self,
        source: &AnyDiscriminatorColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_any_discriminator_column_name(source)?))
    }

    fn determine_any_key_column_name(
        &self,
        source: &AnyKeyColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_any_key_column_name(source)?))
    }

    fn determine_map_key_column_name(
        &self,
        source: &MapKeyColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_map_key_column_name(source)?))
    }

    fn determine_list_index_column_name(
        &self,
        source: &IndexColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        Ok(self.apply(self.delegate.determine_list_index_column_name(source)?))
    }

    fn determine_foreign_key_name(
        &self,
        source: &ForeignKeyNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let raw = raw_foreign_key_name(
            source.table_name,
            source.column_names,
            source.referenced_table_name,
        );
        self.finish(&raw, "foreign key", source.context)
    }

    fn determine_unique_key_name(
        &self,
        source: &UniqueKeyNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let raw = raw_unique_key_name(source.table_name, source.column_names);
        self.finish(&raw, "unique key", source.context)
    }

    fn determine_index_name(
        &self,
        source: &IndexNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let raw = raw_index_name(source.column_names);
        self.finish(&raw, "index", source.context)
    }
}
