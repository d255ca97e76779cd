//! Degrees of separation over a film-credit dataset.
//!
//! - **`store`**: people, movies and the credits between them, built once
//!   from record sets and read-only afterwards.
//! - **`names`**: case-insensitive name to person id lookup.
//! - **`frontier`**: FIFO and LIFO containers of pending search nodes.
//! - **`search`**: breadth-first shortest path with path reconstruction.
//! - **`data_loading`**: reads the `people.csv`, `movies.csv` and
//!   `stars.csv` record sets from a directory.

pub mod data_loading;
pub mod error;
pub mod frontier;
pub mod names;
pub mod search;
pub mod store;

pub use error::{DegreesError, Result};
pub use search::{find_path, find_path_depth_first, Path, PathStep, Search, SearchState};
pub use store::{EntityStore, Movie, MovieId, Person, PersonId};
