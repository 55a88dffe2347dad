use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// What a failed lookup or comparison was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    /// A single free-text lookup.
    Item(String),
    /// One or both sides of a comparison.
    Pair(String, String),
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Missing::Item(query) => write!(f, "{query:?}"),
            Missing::Pair(first, second) => write!(f, "{first:?} or {second:?}"),
        }
    }
}

/// Recoverable, user-facing failures of the engine.
///
/// None of these is fatal: each one maps to a plain-language reply (see
/// [`crate::render`]) and leaves the engine ready for the next request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no item matches {0}")]
    NotFound(Missing),

    #[error("invalid category: {0:?} (expected 'food' or 'beverages')")]
    InvalidCategory(String),

    #[error("invalid nutrient: {0:?} (expected 'low fat', 'high protein' or 'high fibre')")]
    InvalidNutrient(String),

    #[error("dataset load failed: {0}")]
    LoaderFailure(String),
}

impl From<crate::dataset::LoadError> for Error {
    fn from(err: crate::dataset::LoadError) -> Self {
        Error::LoaderFailure(err.to_string())
    }
}
