use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Instant;

use serde::de::DeserializeOwned;

use crate::error::{DegreesError, Result};
use crate::store::{EntityStore, MovieRecord, PersonRecord, RecordSets, StarRecord};

pub const PEOPLE_FILE: &str = "people.csv";
pub const MOVIES_FILE: &str = "movies.csv";
pub const STARS_FILE: &str = "stars.csv";

/// Loads `people.csv`, `movies.csv` and `stars.csv` from `directory`.
///
/// A missing file is a missing record set and fails the load; rows that
/// do not deserialize are skipped.
pub fn load_directory(directory: &Path) -> Result<EntityStore> {
    let started = Instant::now();
    let records = RecordSets {
        people: read_records::<PersonRecord>(&directory.join(PEOPLE_FILE))?,
        movies: read_records::<MovieRecord>(&directory.join(MOVIES_FILE))?,
        stars: read_records::<StarRecord>(&directory.join(STARS_FILE))?,
    };
    let store = EntityStore::load(records)?;
    tracing::info!(
        directory = %directory.display(),
        people = store.people_count(),
        movies = store.movie_count(),
        credits = store.credit_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "data loaded"
    );
    Ok(store)
}

/// Reads every row of a headed CSV file. `Ok(None)` if the file is absent.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(DegreesError::Io { path: path.to_path_buf(), source });
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true) // short rows fail per row instead of aborting the file
        .from_reader(file);
    // an unreadable header means the whole set is unusable
    reader.headers()?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(path = %path.display(), skipped, "skipped malformed rows");
    }
    Ok(Some(rows))
}
