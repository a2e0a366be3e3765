//! Command implementations for the `k2n` CLI.
//!
//! Each submodule corresponds to a top-level CLI command.

/// Identifier length check: `k2n check <mapping>`.
///
/// Some databases cap identifiers at 30 characters; readable constraint
/// names can exceed that.
pub mod check;

/// Name conversion: `k2n convert <name>...`.
pub mod convert;

/// Shared loading of mapping files and naming configuration.
pub mod load;

/// Schema preview: `k2n schema <mapping>`.
pub mod schema;
