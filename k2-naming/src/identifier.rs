use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A database object name plus its quoting flag.
///
/// Two identifiers are equal when their canonical names are equal: unquoted
/// identifiers compare case-insensitively, quoted identifiers compare exactly.
/// Ordering follows the same rule and is ordinal, not locale aware.
#[derive(Debug, Clone)]
pub struct Identifier {
    text: String,
    quoted: bool,
}

impl Identifier {
    pub fn new(text: impl Into<String>, quoted: bool) -> Self {
        Self {
            text: text.into(),
            quoted,
        }
    }

    /// Parse a name, honoring back-tick or double-quote wrapping.
    ///
    /// Returns `None` for blank input.
    ///
    /// ```
    /// use k2_naming::Identifier;
    ///
    /// let id = Identifier::to_identifier("`Order`").unwrap();
    /// assert!(id.is_quoted());
    /// assert_eq!(id.text(), "Order");
    /// assert!(Identifier::to_identifier("  ").is_none());
    /// ```
    pub fn to_identifier(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        match strip_quotes(trimmed) {
            Some(inner) => Some(Self::new(inner, true)),
            None => Some(Self::new(trimmed, false)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// The name used for comparisons: the text as-is when quoted, lower-cased otherwise.
    pub fn canonical_name(&self) -> String {
        if self.quoted {
            self.text.clone()
        } else {
            self.text.to_lowercase()
        }
    }

    /// Render the identifier, wrapping quoted names in back-ticks.
    pub fn render(&self) -> String {
        if self.quoted {
            format!("`{}`", self.text)
        } else {
            self.text.clone()
        }
    }

    /// Same text, quoted.
    pub fn quoted(&self) -> Self {
        Self::new(self.text.clone(), true)
    }
}

fn strip_quotes(text: &str) -> Option<&str> {
    for quote in ['`', '"'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return Some(&text[1..text.len() - 1]);
        }
    }
    None
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_name() == other.canonical_name()
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_name().hash(state);
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_name().cmp(&other.canonical_name())
    }
}
