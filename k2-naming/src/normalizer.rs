use crate::identifier::Identifier;

/// SQL reserved words quoted when `auto_quote_keywords` is enabled.
const RESERVED_WORDS: &[&str] = &[
    "all", "alter", "and", "any", "as", "asc", "between", "by", "case", "check", "column",
    "constraint", "create", "cross", "current", "default", "delete", "desc", "distinct", "drop",
    "else", "end", "exists", "false", "fetch", "for", "foreign", "from", "full", "grant",
    "group", "having", "in", "index", "inner", "insert", "intersect", "into", "is", "join",
    "key", "left", "like", "limit", "not", "null", "offset", "on", "or", "order", "outer",
    "primary", "references", "right", "select", "set", "table", "then", "to", "true", "union",
    "unique", "update", "user", "using", "value", "values", "when", "where", "with",
];

/// Applies the global quoting rules to identifiers built by naming strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectNameNormalizer {
    /// Quote every identifier.
    pub globally_quoted_identifiers: bool,
    /// Quote identifiers that collide with SQL reserved words.
    pub auto_quote_keywords: bool,
}

impl ObjectNameNormalizer {
    pub fn new(globally_quoted_identifiers: bool, auto_quote_keywords: bool) -> Self {
        Self {
            globally_quoted_identifiers,
            auto_quote_keywords,
        }
    }

    /// Decide the quoting of `identifier`. Already quoted identifiers are kept as-is.
    pub fn normalize_identifier_quoting(&self, identifier: Identifier) -> Identifier {
        if identifier.is_quoted() {
            return identifier;
        }
        if self.globally_quoted_identifiers {
            return identifier.quoted();
        }
        if self.auto_quote_keywords && is_reserved_word(identifier.text()) {
            return identifier.quoted();
        }
        identifier
    }
}

/// Case-insensitive lookup in the reserved word list.
pub fn is_reserved_word(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    RESERVED_WORDS.binary_search(&lower.as_str()).is_ok()
}

/// Defaults used by base strategies when a name has no code-level origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDefaults {
    pub implicit_discriminator_column: String,
    pub implicit_tenant_id_column: String,
    pub implicit_id_column: String,
}

impl Default for MappingDefaults {
    fn default() -> Self {
        Self {
            implicit_discriminator_column: "DTYPE".to_string(),
            implicit_tenant_id_column: "tenant_id".to_string(),
            implicit_id_column: "id".to_string(),
        }
    }
}

/// Everything a naming source exposes about the mapping being built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingContext {
    pub normalizer: ObjectNameNormalizer,
    pub defaults: MappingDefaults,
}

impl BuildingContext {
    pub fn new(normalizer: ObjectNameNormalizer, defaults: MappingDefaults) -> Self {
        Self {
            normalizer,
            defaults,
        }
    }
}
