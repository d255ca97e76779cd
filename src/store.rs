//! In-memory entity tables for people, movies and the credits linking them.
//!
//! The store is built once from three record sets and is read-only afterwards.
//! A credit is recorded on both sides (the person's movie set and the movie's
//! star set) or not at all, so the co-star relation is always symmetric.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Deserialize;

use crate::error::{DegreesError, Result};
use crate::names::NameIndex;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl PersonId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl MovieId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        PersonId(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        PersonId(id)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        MovieId(id.to_string())
    }
}

impl From<String> for MovieId {
    fn from(id: String) -> Self {
        MovieId(id)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A row of `people.csv`. An empty or non-numeric birth year becomes `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub birth: Option<u16>,
}

/// A row of `movies.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub year: Option<u16>,
}

/// A row of `stars.csv`: one person credited in one movie.
#[derive(Debug, Clone, Deserialize)]
pub struct StarRecord {
    pub person_id: PersonId,
    pub movie_id: MovieId,
}

/// The three record sets handed over by the data-loading collaborator.
/// `None` means the set was not supplied at all.
#[derive(Debug, Default)]
pub struct RecordSets {
    pub people: Option<Vec<PersonRecord>>,
    pub movies: Option<Vec<MovieRecord>>,
    pub stars: Option<Vec<StarRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub birth: Option<u16>,
    pub movies: BTreeSet<MovieId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: Option<u16>,
    pub stars: BTreeSet<PersonId>,
}

#[derive(Debug)]
pub struct EntityStore {
    people: HashMap<PersonId, Person>,
    movies: HashMap<MovieId, Movie>,
    names: NameIndex,
}

impl EntityStore {
    /// Builds the store. Fails only when a whole record set is missing;
    /// duplicate ids keep the first record and credits that reference an
    /// unknown person or movie are dropped.
    pub fn load(records: RecordSets) -> Result<Self> {
        let people_rows = records.people.ok_or(DegreesError::DataIntegrity { record_set: "people" })?;
        let movie_rows = records.movies.ok_or(DegreesError::DataIntegrity { record_set: "movies" })?;
        let star_rows = records.stars.ok_or(DegreesError::DataIntegrity { record_set: "stars" })?;

        let mut people: HashMap<PersonId, Person> = HashMap::with_capacity(people_rows.len());
        for row in people_rows {
            people.entry(row.id.clone()).or_insert(Person {
                id: row.id,
                name: row.name,
                birth: row.birth,
                movies: BTreeSet::new(),
            });
        }

        let mut movies: HashMap<MovieId, Movie> = HashMap::with_capacity(movie_rows.len());
        for row in movie_rows {
            movies.entry(row.id.clone()).or_insert(Movie {
                id: row.id,
                title: row.title,
                year: row.year,
                stars: BTreeSet::new(),
            });
        }

        let mut dropped = 0usize;
        for star in star_rows {
            // both sides must exist before either set is touched
            match (people.get_mut(&star.person_id), movies.get_mut(&star.movie_id)) {
                (Some(person), Some(movie)) => {
                    person.movies.insert(star.movie_id);
                    movie.stars.insert(star.person_id);
                }
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "skipped credits referencing unknown people or movies");
        }

        let names = NameIndex::build(people.values());
        Ok(EntityStore { people, movies, names })
    }

    pub fn person(&self, id: &PersonId) -> Result<&Person> {
        self.people
            .get(id)
            .ok_or_else(|| DegreesError::PersonNotFound(id.clone()))
    }

    pub fn movie(&self, id: &MovieId) -> Result<&Movie> {
        self.movies
            .get(id)
            .ok_or_else(|| DegreesError::MovieNotFound(id.clone()))
    }

    /// Every (movie, co-star) pair for the movies `id` starred in.
    ///
    /// The person appears as their own co-star once per movie; callers
    /// filter self-edges. Two people sharing several movies yield one pair
    /// per shared movie.
    pub fn neighbors_of(&self, id: &PersonId) -> Result<BTreeSet<(MovieId, PersonId)>> {
        let person = self.person(id)?;
        let mut neighbors = BTreeSet::new();
        for movie_id in &person.movies {
            let movie = self.movie(movie_id)?;
            for star in &movie.stars {
                neighbors.insert((movie_id.clone(), star.clone()));
            }
        }
        Ok(neighbors)
    }

    /// Case-insensitive lookup of everyone whose display name is `name`,
    /// with enough metadata (name, birth year) for the caller to pick one.
    pub fn resolve_name(&self, name: &str) -> Vec<&Person> {
        self.names
            .resolve(name)
            .iter()
            .filter_map(|id| self.people.get(id))
            .collect()
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    pub fn people_count(&self) -> usize {
        self.people.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    pub fn credit_count(&self) -> usize {
        self.movies.values().map(|movie| movie.stars.len()).sum()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn person(id: &str, name: &str, birth: Option<u16>) -> PersonRecord {
        PersonRecord { id: id.into(), name: name.to_string(), birth }
    }

    pub fn movie(id: &str, title: &str, year: Option<u16>) -> MovieRecord {
        MovieRecord { id: id.into(), title: title.to_string(), year }
    }

    pub fn star(person_id: &str, movie_id: &str) -> StarRecord {
        StarRecord { person_id: person_id.into(), movie_id: movie_id.into() }
    }

    /// Builds a store where every person is named after their id and every
    /// movie is titled after its id. `casts` lists (movie, stars) pairs.
    pub fn store_from_casts(people: &[&str], casts: &[(&str, &[&str])]) -> EntityStore {
        let records = RecordSets {
            people: Some(people.iter().map(|id| person(id, id, None)).collect()),
            movies: Some(casts.iter().map(|(id, _)| movie(id, id, None)).collect()),
            stars: Some(
                casts
                    .iter()
                    .flat_map(|(movie_id, stars)| stars.iter().map(move |p| star(p, movie_id)))
                    .collect(),
            ),
        };
        EntityStore::load(records).expect("fixture records are complete")
    }
}
