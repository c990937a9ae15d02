use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// The field has no statically determinable type (e.g. only inferable
    /// from a constructor default), so nothing can be generated for it.
    #[error("field `{field}` has no resolvable type; it cannot be assigned from a constructor")]
    UnresolvedType { field: String },

    #[error("field `{field}`: signature `{signature}` disagrees with declared nullability ({declared})")]
    NullabilityMismatch { field: String, signature: String, declared: bool },

    #[error("invalid {kind} name `{name}`")]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("{path}: {message}")]
    Document { path: String, message: String },
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;
