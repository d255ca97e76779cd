use std::path::PathBuf;

use crate::store::{MovieId, PersonId};

pub type Result<T> = std::result::Result<T, DegreesError>;

/// Errors raised by the entity store, the loader and the search engine.
///
/// "No path" is not an error; `find_path` reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum DegreesError {
    /// A whole record set needed to build the store is absent.
    #[error("required record set is missing: {record_set}")]
    DataIntegrity { record_set: &'static str },

    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("movie not found: {0}")]
    MovieNotFound(MovieId),

    /// Removal from an empty frontier. The engine checks emptiness first,
    /// so seeing this means the traversal loop is broken.
    #[error("attempted to remove a node from an empty frontier")]
    EmptyFrontier,

    /// Source and target are the same person; there is no zero-length path.
    #[error("source and target are the same person: {0}")]
    SamePerson(PersonId),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
