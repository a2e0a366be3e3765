use serde::Deserialize;

use crate::source::EntityNaming;

/// How the classes of an entity hierarchy are spread over tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritanceStrategy {
    /// One table for the whole hierarchy, rows told apart by a discriminator.
    #[default]
    SingleTable,
    /// One table per class holding only the attributes it declares, joined on the primary key.
    Joined,
    /// One table per concrete class holding every inherited attribute.
    TablePerClass,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InheritanceMapping {
    pub strategy: InheritanceStrategy,
    /// Explicit discriminator column. A joined hierarchy only gets a discriminator when set.
    pub discriminator_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdMapping {
    pub attribute: String,
    #[serde(default)]
    pub column: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    #[default]
    Basic,
    ManyToOne,
    ManyToMany,
    ElementCollection,
    Any,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    #[default]
    Set,
    List,
    Map,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeMapping {
    pub name: String,
    #[serde(default)]
    pub kind: AttributeKind,
    /// Explicit column (basic, element or join column).
    #[serde(default)]
    pub column: Option<String>,
    /// Target entity of an association.
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub container: CollectionKind,
}

impl AttributeMapping {
    pub fn basic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Basic,
            column: None,
            target: None,
            container: CollectionKind::Set,
        }
    }

    pub fn many_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: AttributeKind::ManyToOne,
            target: Some(target.into()),
            ..Self::basic(name)
        }
    }

    pub fn many_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: AttributeKind::ManyToMany,
            target: Some(target.into()),
            ..Self::basic(name)
        }
    }

    pub fn element_collection(name: impl Into<String>, container: CollectionKind) -> Self {
        Self {
            kind: AttributeKind::ElementCollection,
            container,
            ..Self::basic(name)
        }
    }

    pub fn any(name: impl Into<String>) -> Self {
        Self {
            kind: AttributeKind::Any,
            ..Self::basic(name)
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

/// Mapping of one entity class.
///
/// Can be built in code or read from YAML:
///
/// ```yaml
/// - class: com.acme.Invoice
///   id: { attribute: id }
///   attributes:
///     - name: customer
///       kind: many_to_one
///       target: com.acme.Customer
///     - name: issuedAt
///   indexes:
///     - [issuedAt]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityMapping {
    /// Fully qualified class name.
    pub class: String,
    /// Explicit entity name.
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit table name.
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub id: Option<IdMapping>,
    #[serde(default)]
    pub attributes: Vec<AttributeMapping>,
    /// Class of the parent entity.
    #[serde(default)]
    pub extends: Option<String>,
    /// Only read on the root of a hierarchy.
    #[serde(default)]
    pub inheritance: Option<InheritanceMapping>,
    #[serde(default)]
    pub tenant_aware: bool,
    /// Attribute name lists.
    #[serde(default)]
    pub unique_constraints: Vec<Vec<String>>,
    /// Attribute name lists.
    #[serde(default)]
    pub indexes: Vec<Vec<String>>,
}

impl EntityMapping {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: None,
            table: None,
            id: None,
            attributes: Vec::new(),
            extends: None,
            inheritance: None,
            tenant_aware: false,
            unique_constraints: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn id(mut self, attribute: impl Into<String>) -> Self {
        self.id = Some(IdMapping {
            attribute: attribute.into(),
            column: None,
        });
        self
    }

    pub fn attribute(mut self, attribute: AttributeMapping) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn basic(self, name: impl Into<String>) -> Self {
        self.attribute(AttributeMapping::basic(name))
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn inheritance(
        mut self,
        strategy: InheritanceStrategy,
        discriminator_column: Option<&str>,
    ) -> Self {
        self.inheritance = Some(InheritanceMapping {
            strategy,
            discriminator_column: discriminator_column.map(str::to_string),
        });
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn tenant_aware(mut self) -> Self {
        self.tenant_aware = true;
        self
    }

    pub fn unique(mut self, attributes: &[&str]) -> Self {
        self.unique_constraints
            .push(attributes.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn index(mut self, attributes: &[&str]) -> Self {
        self.indexes.push(attributes.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn entity_naming(&self) -> EntityNaming {
        let naming = EntityNaming::new(self.class.clone());
        match &self.name {
            Some(name) => naming.with_jpa_entity_name(name.clone()),
            None => naming,
        }
    }

    /// Parse a YAML list of entity mappings.
    pub fn list_from_yaml_str(yaml: &str) -> Result<Vec<EntityMapping>, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
