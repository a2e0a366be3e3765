use std::path::Path;

use colored::Colorize;
use k2_naming::mapping::{ColumnRole, Table};
use k2_naming::{Identifier, NamingConfig, Schema};

use super::load;

pub fn run(
    mapping_path: &Path,
    config: &NamingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load::bind_schema(mapping_path, config)?;
    print!("{}", render(&schema));
    println!("  {} tables total", schema.tables.len());
    Ok(())
}

/// Plain-text listing of every table, column and constraint.
pub fn render(schema: &Schema) -> String {
    let mut out = String::new();
    for table in &schema.tables {
        render_table(table, &mut out);
        out.push('\n');
    }
    out
}

fn render_table(table: &Table, out: &mut String) {
    out.push_str(&format!("{}\n", table.name.to_string().bold()));
    for column in &table.columns {
        let marker = if table.primary_key.contains(&column.name) {
            "PK"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {:<2} {:<32} {}\n",
            marker,
            column.name.to_string(),
            role_label(column.role).dimmed()
        ));
    }
    for fk in &table.foreign_keys {
        out.push_str(&format!(
            "  {} {} ({}) -> {} ({})\n",
            "FK".yellow(),
            fk.name,
            join(&fk.columns),
            fk.referenced_table,
            join(&fk.referenced_columns)
        ));
    }
    for uk in &table.unique_keys {
        out.push_str(&format!("  {} {} ({})\n", "UK".cyan(), uk.name, join(&uk.columns)));
    }
    for index in &table.indexes {
        out.push_str(&format!(
            "  {} {} ({})\n",
            "IX".magenta(),
            index.name,
            join(&index.columns)
        ));
    }
}

fn join(columns: &[Identifier]) -> String {
    columns
        .iter()
        .map(Identifier::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn role_label(role: ColumnRole) -> &'static str {
    match role {
        ColumnRole::Identifier => "id",
        ColumnRole::PrimaryKeyJoin => "pk join",
        ColumnRole::Discriminator => "discriminator",
        ColumnRole::TenantId => "tenant",
        ColumnRole::Basic => "basic",
        ColumnRole::JoinColumn => "join",
        ColumnRole::CollectionElement => "element",
        ColumnRole::ListIndex => "list index",
        ColumnRole::MapKey => "map key",
        ColumnRole::AnyDiscriminator => "any discriminator",
        ColumnRole::AnyKey => "any key",
    }
}
