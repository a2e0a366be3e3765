use crate::error::NamingError;
use crate::identifier::Identifier;
use crate::jpa::{to_identifier, JpaCompliantNamingStrategy};
use crate::source::{
    AnyDiscriminatorColumnNameSource, AnyKeyColumnNameSource, BasicColumnNameSource,
    CollectionTableNameSource, DiscriminatorColumnNameSource, EntityNameSource,
    ForeignKeyNameSource, IdentifierColumnNameSource, IndexColumnNameSource, IndexNameSource,
    JoinColumnNameSource, JoinTableNameSource, MapKeyColumnNameSource,
    PrimaryKeyJoinColumnNameSource, TenantIdColumnNameSource, UniqueKeyNameSource,
};
use crate::strategy::ImplicitNamingStrategy;

/// JPA naming with Spring's join table rule: the join table of a
/// many-to-many association is named after the owning table and the
/// owning attribute, so two associations between the same entities get
/// distinct tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpringImplicitNamingStrategy {
    jpa: JpaCompliantNamingStrategy,
}

impl SpringImplicitNamingStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImplicitNamingStrategy for SpringImplicitNamingStrategy {
    fn determine_join_table_name(
        &self,
        source: &JoinTableNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        let name = format!(
            "{}_{}",
            source.owning_physical_table_name,
            self.jpa
                .transform_attribute_path(source.association_owning_attribute_path)
        );
        to_identifier(&name, "join table", source.context)
    }

    fn determine_primary_table_name(
        &self,
        source: &EntityNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_primary_table_name(source)
    }

    fn determine_collection_table_name(
        &self,
        source: &CollectionTableNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_collection_table_name(source)
    }

    fn determine_discriminator_column_name(
        &self,
        source: &DiscriminatorColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_discriminator_column_name(source)
    }

    fn determine_tenant_id_column_name(
        &self,
        source: &TenantIdColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_tenant_id_column_name(source)
    }

    fn determine_identifier_column_name(
        &self,
        source: &IdentifierColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_identifier_column_name(source)
    }

    fn determine_basic_column_name(
        &self,
        source: &BasicColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_basic_column_name(source)
    }

    fn determine_join_column_name(
        &self,
        source: &JoinColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_join_column_name(source)
    }

    fn determine_primary_key_join_column_name(
        &self,
        source: &PrimaryKeyJoinColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_primary_key_join_column_name(source)
    }

    fn determine_any_discriminator_column_name(
        &self,
        source: &AnyDiscriminatorColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_any_discriminator_column_name(source)
    }

    fn determine_any_key_column_name(
        &self,
        source: &AnyKeyColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_any_key_column_name(source)
    }

    fn determine_map_key_column_name(
        &self,
        source: &MapKeyColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_map_key_column_name(source)
    }

    fn determine_list_index_column_name(
        &self,
        source: &IndexColumnNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_list_index_column_name(source)
    }

    fn determine_foreign_key_name(
        &self,
        source: &ForeignKeyNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_foreign_key_name(source)
    }

    fn determine_unique_key_name(
        &self,
        source: &UniqueKeyNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_unique_key_name(source)
    }

    fn determine_index_name(
        &self,
        source: &IndexNameSource<'_>,
    ) -> Result<Identifier, NamingError> {
        self.jpa.determine_index_name(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::BuildingContext;
    use crate::source::{AttributePath, EntityNaming};

    #[test]
    fn test_join_table_uses_owning_attribute() {
        let context = BuildingContext::default();
        let owner = EntityNaming::new("com.acme.Course");
        let other = EntityNaming::new("com.acme.Student");
        let path = AttributePath::new("enrolledStudents");
        let source = JoinTableNameSource {
            owning_physical_table_name: "Course",
            owning_entity_naming: &owner,
            non_owning_physical_table_name: "Student",
            non_owning_entity_naming: &other,
            association_owning_attribute_path: &path,
            context: &context,
        };

        let spring = SpringImplicitNamingStrategy::new()
            .determine_join_table_name(&source)
            .unwrap();
        let jpa = JpaCompliantNamingStrategy::new()
            .determine_join_table_name(&source)
            .unwrap();
        assert_eq!(spring.text(), "Course_enrolledStudents");
        assert_eq!(jpa.text(), "Course_Student");
    }
}
