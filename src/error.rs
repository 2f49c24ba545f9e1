use thiserror::Error;

/// Result type alias for specifier lookups
pub type Result<T> = std::result::Result<T, SpecifierError>;

/// Errors raised by strict lookups.
///
/// The query methods of [`ApiSpecifier`](crate::specifier::ApiSpecifier) never
/// surface these: they resolve them to absent results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecifierError {
    #[error("parameter `{param}` appears {count} times in `{method}`")]
    AmbiguousParameter {
        method: String,
        param: String,
        count: usize,
    },

    #[error("type `{0}` was not found")]
    TypeNotFound(String),
}
