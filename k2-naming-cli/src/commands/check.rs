use std::path::Path;

use colored::Colorize;
use k2_naming::{NamingConfig, Schema};

use super::load;

/// An identifier longer than the allowed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongIdentifier {
    pub table: String,
    pub identifier: String,
    pub length: usize,
}

/// Every identifier of `schema` whose text is longer than `max_length` characters.
pub fn long_identifiers(schema: &Schema, max_length: usize) -> Vec<LongIdentifier> {
    let mut found = Vec::new();
    for table in &schema.tables {
        for identifier in table.identifiers() {
            let length = identifier.text().chars().count();
            if length > max_length {
                found.push(LongIdentifier {
                    table: table.name.text().to_string(),
                    identifier: identifier.text().to_string(),
                    length,
                });
            }
        }
    }
    found
}

pub fn run(
    mapping_path: &Path,
    config: &NamingConfig,
    max_length: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load::bind_schema(mapping_path, config)?;
    let found = long_identifiers(&schema, max_length);

    if found.is_empty() {
        println!(
            "{} all identifiers fit in {max_length} characters",
            "ok".green().bold()
        );
        return Ok(());
    }

    for long in &found {
        println!(
            "  {} {:<40} {} chars (table {})",
            "!".yellow(),
            long.identifier,
            long.length,
            long.table
        );
    }
    Err(format!(
        "{} identifiers longer than {max_length} characters",
        found.len()
    )
    .into())
}
