use crate::identifier::Identifier;

/// What a column is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Identifier,
    PrimaryKeyJoin,
    Discriminator,
    TenantId,
    Basic,
    JoinColumn,
    CollectionElement,
    ListIndex,
    MapKey,
    AnyDiscriminator,
    AnyKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: Identifier,
    pub role: ColumnRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
    pub referenced_table: Identifier,
    pub referenced_columns: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: Identifier,
    pub columns: Vec<Column>,
    pub primary_key: Vec<Identifier>,
    pub foreign_keys: Vec<ForeignKey>,
    pub unique_keys: Vec<UniqueKey>,
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn new(name: Identifier) -> Self {
        Self {
            name,
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            unique_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Add a column unless one with the same canonical name exists.
    pub fn add_column(&mut self, name: Identifier, role: ColumnRole) {
        if !self.columns.iter().any(|c| c.name == name) {
            self.columns.push(Column { name, role });
        }
    }

    /// Move the columns and constraints of `other` into this table.
    pub fn merge(&mut self, other: Table) {
        for column in other.columns {
            self.add_column(column.name, column.role);
        }
        self.foreign_keys.extend(other.foreign_keys);
        self.unique_keys.extend(other.unique_keys);
        self.indexes.extend(other.indexes);
    }

    /// Look up a column by canonical name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        let wanted = Identifier::new(name, false);
        self.columns.iter().find(|c| c.name == wanted)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.text()).collect()
    }

    /// Every identifier this table introduces: table, columns and constraints.
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        std::iter::once(&self.name)
            .chain(self.columns.iter().map(|c| &c.name))
            .chain(self.foreign_keys.iter().map(|fk| &fk.name))
            .chain(self.unique_keys.iter().map(|uk| &uk.name))
            .chain(self.indexes.iter().map(|idx| &idx.name))
    }
}

/// Tables derived from a set of entity mappings, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    /// Look up a table by canonical name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        let wanted = Identifier::new(name, false);
        self.tables.iter().find(|t| t.name == wanted)
    }

    pub(crate) fn table_mut(&mut self, name: &Identifier) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| &t.name == name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.text()).collect()
    }
}
