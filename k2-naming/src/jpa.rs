use md5::{Digest, Md5};

use crate::error::NamingError;
use crate::identifier::Identifier;
use crate::normalizer::BuildingContext;
use crate::source::{
    unqualify, AnyDiscriminatorColumnNameSource, AnyKeyColumnNameSource, AttributePath,
    BasicColumnNameSource, CollectionTableNameSource, DiscriminatorColumnNameSource,
    EntityNameSource, EntityNaming, ForeignKeyNameSource, IdentifierColumnNameSource,
    IndexColumnNameSource, IndexNameSource, JoinColumnNameSource, JoinColumnNature,
    JoinTableNameSource, MapKeyColumnNameSource, PrimaryKeyJoinColumnNameSource,
    TenantIdColumnNameSource, UniqueKeyNameSource,
};
use crate::strategy::ImplicitNamingStrategy;

const BASE35_DIGITS: &[u8; 35] = b"0123456789abcdefghijklmnopqrstuvwxy";

/// The JPA default naming rules.
///
/// Tables are named after the unqualified entity name, columns after the
/// attribute they map. Constraint names are hashed so they stay short.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpaCompliantNamingStrategy;

impl JpaCompliantNamingStrategy {
    pub fn new() -> Self {
        Self
    }

    /// The explicit entity name when set, otherwise the unqualified entity name.
    pub fn transform_entity_name(&self, naming: &EntityNaming) -> Result<String, NamingError> {
        if let Some(jpa_name) = naming.jpa_entity_name.as_deref() {
            if !jpa_name.trim().is_empty() {
                return Ok(jpa_name.to_string());
            }
        }
        let name = unqualify(&naming.entity_name);
        if name.trim().is_empty() {
            return Err(NamingError::MissingEntityName(naming.class_name.clone()));
        }
        Ok(name.to_string())
    }

    pub fn transform_attribute_path(&self, path: &AttributePath) -> String {
        path.property().to_string()
    }
}

/// Build an identifier from a derived name and normalize its quoting.
pub(crate) fn to_identifier(
    name: &str,
    kind: &'static str,
    context: &BuildingContext,
) -> Result<Identifier, NamingError> {
    Identifier::to_identifier(name)
        .map(|id| context.normalizer.normalize_identifier_quoting(id))
        .ok_or(NamingError::BlankName { kind })
}

/// Base-35 rendering of the MD5 digest of `input`, read as an unsigned
/// big-endian integer.
pub fn hashed_name(input: &str) -> String {
    let digest = Md5::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    let mut value = u128::from_be_bytes(bytes);
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(BASE35_DIGITS[(value % 35) as usize]);
        value /= 35;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Hashed name of a foreign key. Columns are sorted so binding order does not matter.
pub fn hashed_foreign_key_name(
    prefix: &str,
    table: &Identifier,
    referenced_table: &Identifier,
    columns: &[Identifier],
) -> String {
    let mut descriptor = format!("table`{table}`references`{referenced_table}`");
    append_sorted_columns(&mut descriptor, columns);
    format!("{prefix}{}", hashed_name(&descriptor))
}

/// Hashed name of a unique key or index.
pub fn hashed_constraint_name(prefix: &str, table: &Identifier, columns: &[Identifier]) -> String {
    let mut descriptor = format!("table`{table}`");
    append_sorted_columns(&mut descriptor, columns);
    format!("{prefix}{}", hashed_name(&descriptor))
}

fn append_sorted_columns(descriptor: &mut String, columns: &[Identifier]) {
    let mut sorted: Vec<&Identifier> = columns.iter().collect();
    sorted.sort();
    for column in sorted {
        descriptor.push_str(&format!("column`{column}`"));
    }
}

impl ImplicitNamingStrategy for JpaCompliantNamingStrategy {
    fn determine_primary_table_name(
        &self,
        source: &EntityNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = self.transform_entity_name(source.entity_naming)?;
        to_identifier(&name, "primary table", source.context)
    }

    fn determine_join_table_name(
        &self,
        source: &JoinTableNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = format!(
            "{}_{}",
            source.owning_physical_table_name, source.non_owning_physical_table_name
        );
        to_identifier(&name, "join table", source.context)
    }

    fn determine_collection_table_name(
        &self,
        source: &CollectionTableNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let owner = self.transform_entity_name(source.owning_entity_naming)?;
        let name = format!(
            "{owner}_{}",
            self.transform_attribute_path(source.owning_attribute_path)
        );
        to_identifier(&name, "collection table", source.context)
    }

    fn determine_discriminator_column_name(
        &self,
        source: &DiscriminatorColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        to_identifier(
            &source.context.defaults.implicit_discriminator_column,
            "discriminator column",
            source.context,
        )
    }

    fn determine_tenant_id_column_name(
        &self,
        source: &TenantIdColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        to_identifier(
            &source.context.defaults.implicit_tenant_id_column,
            "tenant id column",
            source.context,
        )
    }

    fn determine_identifier_column_name(
        &self,
        source: &IdentifierColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = self.transform_attribute_path(source.identifier_attribute_path);
        to_identifier(&name, "identifier column", source.context)
    }

    fn determine_basic_column_name(
        &self,
        source: &BasicColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = self.transform_attribute_path(source.attribute_path);
        to_identifier(&name, "basic column", source.context)
    }

    fn determine_join_column_name(
        &self,
        source: &JoinColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let prefix = match (source.nature, source.attribute_path) {
            (JoinColumnNature::ElementCollection, _) | (_, None) => {
                self.transform_entity_name(source.entity_naming)?
            }
            (_, Some(path)) => self.transform_attribute_path(path),
        };
        let name = format!("{prefix}_{}", source.referenced_column_name.text());
        to_identifier(&name, "join column", source.context)
    }

    fn determine_primary_key_join_column_name(
        &self,
        source: &PrimaryKeyJoinColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        to_identifier(
            source.referenced_primary_key_column_name.text(),
            "primary key join column",
            source.context,
        )
    }

    fn determine_any_discriminator_column_name(
        &self,
        source: &AnyDiscriminatorColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = format!(
            "{}_{}",
            self.transform_attribute_path(source.attribute_path),
            source.context.defaults.implicit_discriminator_column
        );
        to_identifier(&name, "any discriminator column", source.context)
    }

    fn determine_any_key_column_name(
        &self,
        source: &AnyKeyColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = format!(
            "{}_{}",
            self.transform_attribute_path(source.attribute_path),
            source.context.defaults.implicit_id_column
        );
        to_identifier(&name, "any key column", source.context)
    }

    fn determine_map_key_column_name(
        &self,
        source: &MapKeyColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = format!(
            "{}_KEY",
            self.transform_attribute_path(source.plural_attribute_path)
        );
        to_identifier(&name, "map key column", source.context)
    }

    fn determine_list_index_column_name(
        &self,
        source: &IndexColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = format!(
            "{}_ORDER",
            self.transform_attribute_path(source.plural_attribute_path)
        );
        to_identifier(&name, "list index column", source.context)
    }

    fn determine_foreign_key_name(
        &self,
        source: &ForeignKeyNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = hashed_foreign_key_name(
            "FK",
            source.table_name,
            source.referenced_table_name,
            source.column_names,
        );
        to_identifier(&name, "foreign key", source.context)
    }

    fn determine_unique_key_name(
        &self,
        source: &UniqueKeyNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = hashed_constraint_name("UK", source.table_name, source.column_names);
        to_identifier(&name, "unique key", source.context)
    }

    fn determine_index_name(
        &self,
        source: &IndexNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = hashed_constraint_name("IDX", source.table_name, source.column_names);
        to_identifier(&name, "index", source.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashed_name_is_stable_and_base35() {
        let first = hashed_name("table`order`column`id`");
        let second = hashed_name("table`order`column`id`");
        assert_eq!(first, second);
        assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='y').contains(&c)));
        // 128 bits never need more than 25 base-35 digits.
        assert!(first.len() <= 25);
    }

    #[test]
    fn test_hashed_name_known_values() {
        assert_eq!(hashed_name("table`order`column`id`"), "py2hqd45ilfkph4ks1ltbued4");
        assert_eq!(
            hashed_foreign_key_name(
                "FK",
                &Identifier::new("account", false),
                &Identifier::new("customer", false),
                &[Identifier::new("customer_id", false)],
            ),
            "FKnnwpo0lfq4xai1rs6887sx02k"
        );
    }

    #[test]
    fn test_hashed_constraint_ignores_column_order() {
        let table = Identifier::new("account", false);
        let a = [Identifier::new("email", false), Identifier::new("status", false)];
        let b = [Identifier::new("status", false), Identifier::new("email", false)];
        assert_eq!(
            hashed_constraint_name("UK", &table, &a),
            hashed_constraint_name("UK", &table, &b)
        );
    }

    #[test]
    fn test_transform_entity_name_prefers_jpa_name() {
        let strategy = JpaCompliantNamingStrategy::new();
        let naming = EntityNaming::new("com.acme.PurchaseOrder").with_jpa_entity_name("Purchase");
        assert_eq!(strategy.transform_entity_name(&naming).unwrap(), "Purchase");
    }

    #[test]
    fn test_transform_entity_name_blank() {
        let strategy = JpaCompliantNamingStrategy::new();
        let naming = EntityNaming::new("");
        assert!(matches!(
            strategy.transform_entity_name(&naming),
            Err(NamingError::MissingEntityName(_))
        ));
    }
}
