use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::model::{
    AttributeKind, AttributeMapping, CollectionKind, EntityMapping, InheritanceStrategy,
};
use super::schema::{ColumnRole, ForeignKey, Index, Schema, Table, UniqueKey};
use super::MappingError;
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

/// Where an entity keeps its own attributes.
#[derive(Debug, Clone)]
struct EntityTable {
    table: Identifier,
    key: Identifier,
}

struct Hierarchy<'m> {
    mappings: &'m [EntityMapping],
    namings: Vec<EntityNaming>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    /// Entities ordered so that parents come before their subclasses.
    order: Vec<usize>,
}

impl<'m> Hierarchy<'m> {
    fn resolve(mappings: &'m [EntityMapping]) -> Result<Self, MappingError> {
        let mut seen = HashSet::new();
        for mapping in mappings {
            if !seen.insert(mapping.class.as_str()) {
                return Err(MappingError::DuplicateEntity(mapping.class.clone()));
            }
        }

        let mut parents = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            let parent = match mapping.extends.as_deref() {
                Some(name) => Some(find_entity(mappings, name)?),
                None => None,
            };
            parents.push(parent);
        }

        let mut roots = Vec::with_capacity(mappings.len());
        let mut depths = Vec::with_capacity(mappings.len());
        for (idx, mapping) in mappings.iter().enumerate() {
            let mut current = idx;
            let mut depth = 0usize;
            while let Some(parent) = parents[current] {
                depth += 1;
                if depth > mappings.len() {
                    return Err(MappingError::InheritanceCycle(mapping.class.clone()));
                }
                current = parent;
            }
            roots.push(current);
            depths.push(depth);
        }

        let mut order: Vec<usize> = (0..mappings.len()).collect();
        order.sort_by_key(|idx| depths[*idx]);

        Ok(Self {
            mappings,
            namings: mappings.iter().map(EntityMapping::entity_naming).collect(),
            parents,
            roots,
            order,
        })
    }

    fn lookup(&self, name: &str) -> Result<usize, MappingError> {
        find_entity(self.mappings, name)
    }

    fn strategy(&self, idx: usize) -> InheritanceStrategy {
        self.mappings[self.roots[idx]]
            .inheritance
            .as_ref()
            .map(|i| i.strategy)
            .unwrap_or_default()
    }

    fn has_subclasses(&self, idx: usize) -> bool {
        self.parents.contains(&Some(idx))
    }

    /// Whether the entity's attributes live in a table of its own.
    fn owns_table(&self, idx: usize) -> bool {
        self.parents[idx].is_none() || self.strategy(idx) != InheritanceStrategy::SingleTable
    }
}

/// Walks entity mappings and asks a naming strategy for every name.
///
/// Only names are derived; column types and SQL are out of reach of this
/// binder.
pub struct SchemaBinder<'a> {
    strategy: &'a dyn ImplicitNamingStrategy,
    context: &'a BuildingContext,
}

impl<'a> SchemaBinder<'a> {
    pub fn new(strategy: &'a dyn ImplicitNamingStrategy, context: &'a BuildingContext) -> Self {
        Self { strategy, context }
    }

    pub fn bind(&self, mappings: &[EntityMapping]) -> Result<Schema, MappingError> {
        let hierarchy = Hierarchy::resolve(mappings)?;

        let mut entity_tables: Vec<Option<EntityTable>> = vec![None; mappings.len()];
        for &idx in &hierarchy.order {
            let entity_table = self.entity_table(&hierarchy, &entity_tables, idx)?;
            entity_tables[idx] = Some(entity_table);
        }
        // every index appears in `order`, so nothing is dropped here
        let entity_tables: Vec<EntityTable> = entity_tables.into_iter().flatten().collect();

        let mut schema = Schema::default();
        for &idx in &hierarchy.order {
            self.bind_entity(&hierarchy, &entity_tables, idx, &mut schema)?;
        }
        Ok(schema)
    }

    fn explicit(&self, name: &str) -> Option<Identifier> {
        Identifier::to_identifier(name)
            .map(|id| self.context.normalizer.normalize_identifier_quoting(id))
    }

    fn entity_table(
        &self,
        hierarchy: &Hierarchy<'_>,
        bound: &[Option<EntityTable>],
        idx: usize,
    ) -> Result<EntityTable, MappingError> {
        let mapping = &hierarchy.mappings[idx];
        let naming = &hierarchy.namings[idx];

        let Some(parent) = hierarchy.parents[idx] else {
            let table = self.table_name(mapping, naming)?;
            let id = mapping
                .id
                .as_ref()
                .ok_or_else(|| MappingError::MissingIdentifier(mapping.class.clone()))?;
            let key = match id.column.as_deref().and_then(|c| self.explicit(c)) {
                Some(column) => column,
                None => self.strategy.determine_identifier_column_name(
                    &IdentifierColumnNameSource {
                        entity_naming: naming,
                        identifier_attribute_path: &AttributePath::new(id.attribute.clone()),
                        context: self.context,
                    },
                )?,
            };
            return Ok(EntityTable { table, key });
        };

        let parent_table = bound[parent]
            .clone()
            .ok_or_else(|| MappingError::UnknownEntity(hierarchy.mappings[parent].class.clone()))?;
        match hierarchy.strategy(idx) {
            InheritanceStrategy::SingleTable => Ok(parent_table),
            InheritanceStrategy::TablePerClass => Ok(EntityTable {
                table: self.table_name(mapping, naming)?,
                key: parent_table.key,
            }),
            InheritanceStrategy::Joined => {
                let key = self.strategy.determine_primary_key_join_column_name(
                    &PrimaryKeyJoinColumnNameSource {
                        referenced_table_name: &parent_table.table,
                        referenced_primary_key_column_name: &parent_table.key,
                        context: self.context,
                    },
                )?;
                Ok(EntityTable {
                    table: self.table_name(mapping, naming)?,
                    key,
                })
            }
        }
    }

    fn table_name(
        &self,
        mapping: &EntityMapping,
        naming: &EntityNaming,
    ) -> Result<Identifier, MappingError> {
        if let Some(table) = mapping.table.as_deref().and_then(|t| self.explicit(t)) {
            return Ok(table);
        }
        Ok(self.strategy.determine_primary_table_name(&EntityNameSource {
            entity_naming: naming,
            context: self.context,
        })?)
    }

    fn bind_entity(
        &self,
        hierarchy: &Hierarchy<'_>,
        entity_tables: &[EntityTable],
        idx: usize,
        schema: &mut Schema,
    ) -> Result<(), MappingError> {
        let mapping = &hierarchy.mappings[idx];
        let own = &entity_tables[idx];

        // attribute name -> column, for unique keys and indexes
        let mut columns: HashMap<String, Identifier> = HashMap::new();
        if let Some(id) = &hierarchy.mappings[hierarchy.roots[idx]].id {
            columns.insert(id.attribute.clone(), own.key.clone());
        }

        let mut extra_tables = Vec::new();
        let mut table = if hierarchy.owns_table(idx) {
            self.new_entity_table(hierarchy, entity_tables, idx, schema)?
        } else {
            // Collected apart, then merged into the shared table.
            Table::new(own.table.clone())
        };

        for attribute in &mapping.attributes {
            if let Some(column) = self.bind_attribute(
                hierarchy,
                entity_tables,
                idx,
                attribute,
                &mut table,
                &mut extra_tables,
            )? {
                columns.insert(attribute.name.clone(), column);
            }
        }

        for attributes in &mapping.unique_constraints {
            let key_columns = constraint_columns(mapping, &columns, attributes)?;
            let name = self.strategy.determine_unique_key_name(&UniqueKeyNameSource {
                table_name: &table.name,
                column_names: &key_columns,
                context: self.context,
            })?;
            table.unique_keys.push(UniqueKey {
                name,
                columns: key_columns,
            });
        }

        for attributes in &mapping.indexes {
            let index_columns = constraint_columns(mapping, &columns, attributes)?;
            let name = self.strategy.determine_index_name(&IndexNameSource {
                table_name: &table.name,
                column_names: &index_columns,
                context: self.context,
            })?;
            table.indexes.push(Index {
                name,
                columns: index_columns,
            });
        }

        debug!(entity = %mapping.class, table = %table.name, "entity bound");
        if hierarchy.owns_table(idx) {
            schema.tables.push(table);
        } else {
            let shared = schema
                .table_mut(&own.table)
                .ok_or_else(|| MappingError::UnknownEntity(mapping.class.clone()))?;
            shared.merge(table);
        }
        schema.tables.extend(extra_tables);
        Ok(())
    }

    /// Table for a root entity or for a subclass that does not share its parent's table.
    fn new_entity_table(
        &self,
        hierarchy: &Hierarchy<'_>,
        entity_tables: &[EntityTable],
        idx: usize,
        schema: &Schema,
    ) -> Result<Table, MappingError> {
        let mapping = &hierarchy.mappings[idx];
        let naming = &hierarchy.namings[idx];
        let own = &entity_tables[idx];
        let mut table = Table::new(own.table.clone());

        match hierarchy.parents[idx] {
            None => {
                table.add_column(own.key.clone(), ColumnRole::Identifier);
                if let Some(discriminator) = self.discriminator_column(hierarchy, idx)? {
                    table.add_column(discriminator, ColumnRole::Discriminator);
                }
                if mapping.tenant_aware {
                    let tenant = self.strategy.determine_tenant_id_column_name(
                        &TenantIdColumnNameSource {
                            entity_naming: naming,
                            context: self.context,
                        },
                    )?;
                    table.add_column(tenant, ColumnRole::TenantId);
                }
            }
            Some(parent) => match hierarchy.strategy(idx) {
                InheritanceStrategy::Joined => {
                    let parent_table = &entity_tables[parent];
                    table.add_column(own.key.clone(), ColumnRole::PrimaryKeyJoin);
                    let columns = vec![own.key.clone()];
                    let referenced_columns = vec![parent_table.key.clone()];
                    let name = self.strategy.determine_foreign_key_name(&ForeignKeyNameSource {
                        table_name: &table.name,
                        column_names: &columns,
                        referenced_table_name: &parent_table.table,
                        referenced_column_names: &referenced_columns,
                        context: self.context,
                    })?;
                    table.foreign_keys.push(ForeignKey {
                        name,
                        columns,
                        referenced_table: parent_table.table.clone(),
                        referenced_columns,
                    });
                }
                InheritanceStrategy::TablePerClass => {
                    let parent_table = schema
                        .tables
                        .iter()
                        .find(|t| t.name == entity_tables[parent].table)
                        .ok_or_else(|| {
                            MappingError::UnknownEntity(hierarchy.mappings[parent].class.clone())
                        })?;
                    for column in &parent_table.columns {
                        table.add_column(column.name.clone(), column.role);
                    }
                }
                InheritanceStrategy::SingleTable => {}
            },
        }
        table.primary_key.push(own.key.clone());
        Ok(table)
    }

    fn discriminator_column(
        &self,
        hierarchy: &Hierarchy<'_>,
        root: usize,
    ) -> Result<Option<Identifier>, MappingError> {
        let explicit = hierarchy.mappings[root]
            .inheritance
            .as_ref()
            .and_then(|i| i.discriminator_column.as_deref())
            .and_then(|c| self.explicit(c));
        let needed = match hierarchy.strategy(root) {
            InheritanceStrategy::SingleTable => hierarchy.has_subclasses(root),
            InheritanceStrategy::Joined => explicit.is_some(),
            InheritanceStrategy::TablePerClass => false,
        };
        if !needed {
            return Ok(None);
        }
        match explicit {
            Some(column) => Ok(Some(column)),
            None => Ok(Some(self.strategy.determine_discriminator_column_name(
                &DiscriminatorColumnNameSource {
                    entity_naming: &hierarchy.namings[root],
                    context: self.context,
                },
            )?)),
        }
    }

    /// Bind one attribute. Returns the column that represents it in `table`, if any.
    fn bind_attribute(
        &self,
        hierarchy: &Hierarchy<'_>,
        entity_tables: &[EntityTable],
        idx: usize,
        attribute: &AttributeMapping,
        table: &mut Table,
        extra_tables: &mut Vec<Table>,
    ) -> Result<Option<Identifier>, MappingError> {
        let mapping = &hierarchy.mappings[idx];
        let naming = &hierarchy.namings[idx];
        let own = &entity_tables[idx];
        let path = AttributePath::parse(&attribute.name);
        let explicit = attribute.column.as_deref().and_then(|c| self.explicit(c));

        match attribute.kind {
            AttributeKind::Basic => {
                let column = match explicit {
                    Some(column) => column,
                    None => self.strategy.determine_basic_column_name(&BasicColumnNameSource {
                        attribute_path: &path,
                        collection_element: false,
                        context: self.context,
                    })?,
                };
                table.add_column(column.clone(), ColumnRole::Basic);
                Ok(Some(column))
            }
            AttributeKind::ManyToOne => {
                let target = &entity_tables[self.target(hierarchy, mapping, attribute)?];
                let column = match explicit {
                    Some(column) => column,
                    None => self.strategy.determine_join_column_name(&JoinColumnNameSource {
                        nature: JoinColumnNature::EntityAssociation,
                        entity_naming: naming,
                        attribute_path: Some(&path),
                        referenced_table_name: &target.table,
                        referenced_column_name: &target.key,
                        context: self.context,
                    })?,
                };
                table.add_column(column.clone(), ColumnRole::JoinColumn);
                let fk = self.foreign_key(&table.name, vec![column.clone()], target)?;
                table.foreign_keys.push(fk);
                Ok(Some(column))
            }
            AttributeKind::ManyToMany => {
                let target_idx = self.target(hierarchy, mapping, attribute)?;
                let target = &entity_tables[target_idx];
                let name = self.strategy.determine_join_table_name(&JoinTableNameSource {
                    owning_physical_table_name: own.table.text(),
                    owning_entity_naming: naming,
                    non_owning_physical_table_name: target.table.text(),
                    non_owning_entity_naming: &hierarchy.namings[target_idx],
                    association_owning_attribute_path: &path,
                    context: self.context,
                })?;
                let owner_column = self.strategy.determine_join_column_name(&JoinColumnNameSource {
                    nature: JoinColumnNature::JoinTable,
                    entity_naming: naming,
                    attribute_path: None,
                    referenced_table_name: &own.table,
                    referenced_column_name: &own.key,
                    context: self.context,
                })?;
                let inverse_column = self.strategy.determine_join_column_name(&JoinColumnNameSource {
                    nature: JoinColumnNature::JoinTable,
                    entity_naming: naming,
                    attribute_path: Some(&path),
                    referenced_table_name: &target.table,
                    referenced_column_name: &target.key,
                    context: self.context,
                })?;

                let mut join_table = Table::new(name);
                join_table.add_column(owner_column.clone(), ColumnRole::JoinColumn);
                join_table.add_column(inverse_column.clone(), ColumnRole::JoinColumn);
                join_table.primary_key = vec![owner_column.clone(), inverse_column.clone()];
                let owner_fk = self.foreign_key(&join_table.name, vec![owner_column], own)?;
                let inverse_fk = self.foreign_key(&join_table.name, vec![inverse_column], target)?;
                join_table.foreign_keys.push(owner_fk);
                join_table.foreign_keys.push(inverse_fk);
                extra_tables.push(join_table);
                Ok(None)
            }
            AttributeKind::ElementCollection => {
                let name = self
                    .strategy
                    .determine_collection_table_name(&CollectionTableNameSource {
                        owning_physical_table_name: own.table.text(),
                        owning_entity_naming: naming,
                        owning_attribute_path: &path,
                        context: self.context,
                    })?;
                let owner_column = self.strategy.determine_join_column_name(&JoinColumnNameSource {
                    nature: JoinColumnNature::ElementCollection,
                    entity_naming: naming,
                    attribute_path: Some(&path),
                    referenced_table_name: &own.table,
                    referenced_column_name: &own.key,
                    context: self.context,
                })?;
                let element_column = match explicit {
                    Some(column) => column,
                    None => self.strategy.determine_basic_column_name(&BasicColumnNameSource {
                        attribute_path: &path,
                        collection_element: true,
                        context: self.context,
                    })?,
                };

                let mut collection_table = Table::new(name);
                collection_table.add_column(owner_column.clone(), ColumnRole::JoinColumn);
                collection_table.primary_key.push(owner_column.clone());
                match attribute.container {
                    CollectionKind::Set => {
                        collection_table.primary_key.push(element_column.clone());
                    }
                    CollectionKind::List => {
                        let order = self.strategy.determine_list_index_column_name(
                            &IndexColumnNameSource {
                                plural_attribute_path: &path,
                                context: self.context,
                            },
                        )?;
                        collection_table.add_column(order.clone(), ColumnRole::ListIndex);
                        collection_table.primary_key.push(order);
                    }
                    CollectionKind::Map => {
                        let key = self.strategy.determine_map_key_column_name(
                            &MapKeyColumnNameSource {
                                plural_attribute_path: &path,
                                context: self.context,
                            },
                        )?;
                        collection_table.add_column(key.clone(), ColumnRole::MapKey);
                        collection_table.primary_key.push(key);
                    }
                }
                collection_table.add_column(element_column, ColumnRole::CollectionElement);
                let fk = self.foreign_key(&collection_table.name, vec![owner_column], own)?;
                collection_table.foreign_keys.push(fk);
                extra_tables.push(collection_table);
                Ok(None)
            }
            AttributeKind::Any => {
                let discriminator = self.strategy.determine_any_discriminator_column_name(
                    &AnyDiscriminatorColumnNameSource {
                        attribute_path: &path,
                        context: self.context,
                    },
                )?;
                let key = self
                    .strategy
                    .determine_any_key_column_name(&AnyKeyColumnNameSource {
                        attribute_path: &path,
                        context: self.context,
                    })?;
                table.add_column(discriminator, ColumnRole::AnyDiscriminator);
                table.add_column(key.clone(), ColumnRole::AnyKey);
                Ok(Some(key))
            }
        }
    }

    fn target(
        &self,
        hierarchy: &Hierarchy<'_>,
        mapping: &EntityMapping,
        attribute: &AttributeMapping,
    ) -> Result<usize, MappingError> {
        let target = attribute
            .target
            .as_deref()
            .ok_or_else(|| MappingError::MissingTarget {
                entity: mapping.class.clone(),
                attribute: attribute.name.clone(),
            })?;
        hierarchy.lookup(target)
    }

    fn foreign_key(
        &self,
        table: &Identifier,
        columns: Vec<Identifier>,
        referenced: &EntityTable,
    ) -> Result<ForeignKey, MappingError> {
        let referenced_columns = vec![referenced.key.clone()];
        let name = self.strategy.determine_foreign_key_name(&ForeignKeyNameSource {
            table_name: table,
            column_names: &columns,
            referenced_table_name: &referenced.table,
            referenced_column_names: &referenced_columns,
            context: self.context,
        })?;
        Ok(ForeignKey {
            name,
            columns,
            referenced_table: referenced.table.clone(),
            referenced_columns,
        })
    }
}

/// Find an entity by class name, or by unqualified class name when that is unambiguous.
fn find_entity(mappings: &[EntityMapping], name: &str) -> Result<usize, MappingError> {
    if let Some(idx) = mappings.iter().position(|m| m.class == name) {
        return Ok(idx);
    }
    let mut matches = mappings
        .iter()
        .enumerate()
        .filter(|(_, m)| unqualify(&m.class) == name);
    match (matches.next(), matches.next()) {
        (Some((idx, _)), None) => Ok(idx),
        _ => Err(MappingError::UnknownEntity(name.to_string())),
    }
}

fn constraint_columns(
    mapping: &EntityMapping,
    columns: &HashMap<String, Identifier>,
    attributes: &[String],
) -> Result<Vec<Identifier>, MappingError> {
    attributes
        .iter()
        .map(|attribute| {
            columns
                .get(attribute)
                .cloned()
                .ok_or_else(|| MappingError::UnknownAttribute {
                    entity: mapping.class.clone(),
                    attribute: attribute.clone(),
                })
        })
        .collect()
}
