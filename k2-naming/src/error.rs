/// Errors raised by naming strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// The entity naming carries neither a JPA entity name nor an entity name.
    MissingEntityName(String),
    /// A base strategy derived a blank name.
    BlankName { kind: &'static str },
}

impl std::fmt::Display for NamingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NamingError::MissingEntityName(class_name) => {
                write!(f, "Entity naming for '{class_name}' must specify an entity name")
            }
            NamingError::BlankName { kind } => write!(f, "Derived {kind} name is blank"),
        }
    }
}

impl std::error::Error for NamingError {}
