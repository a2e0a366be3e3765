//! # k2-naming-cli
//!
//! Command-line front end for `k2-naming`, shipped as the `k2n` binary.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `k2n convert <name>...` | Print the snake-case form of each name |
//! | `k2n schema <mapping.yaml>` | Bind entity mappings and print the named schema |
//! | `k2n check <mapping.yaml>` | Report identifiers longer than a limit |
//!
//! Commands live under [`commands`]; `schema` and `check` share the
//! mapping/config loading in [`commands::load`].

pub mod commands;
