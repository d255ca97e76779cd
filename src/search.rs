//! Breadth-first search for the shortest chain of co-star edges.
//!
//! A [`Search`] owns its frontier, explored set and node arena. Expanded
//! nodes are pushed into the arena and children refer to their parent by
//! index, so the path is rebuilt by following indices back to the root.
//! Nothing is shared between runs: every call to [`find_path`] starts from
//! an empty frontier and an empty explored set.

use std::collections::HashSet;

use crate::error::{DegreesError, Result};
use crate::frontier::{Frontier, NodeIndex, QueueFrontier, SearchNode, StackFrontier};
use crate::store::{EntityStore, MovieId, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Initialized,
    Expanding,
    /// Terminal: the target was reached.
    Found,
    /// Terminal: the frontier ran dry, the two people are not connected.
    Exhausted,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Found | SearchState::Exhausted)
    }
}

/// One edge of a path: `person` was reached through `movie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub movie: MovieId,
    pub person: PersonId,
}

impl PathStep {
    pub fn new(movie: impl Into<MovieId>, person: impl Into<PersonId>) -> Self {
        PathStep { movie: movie.into(), person: person.into() }
    }
}

/// Steps from the source (exclusive) to the target (inclusive).
/// Its length is the degrees of separation.
pub type Path = Vec<PathStep>;

pub struct Search<'a, F: Frontier> {
    store: &'a EntityStore,
    target: PersonId,
    frontier: F,
    explored: HashSet<PersonId>,
    nodes: Vec<SearchNode>,
    state: SearchState,
    path: Option<Path>,
}

impl<'a, F: Frontier> Search<'a, F> {
    /// Seeds `frontier` with the root node for `source`.
    ///
    /// Both people must exist in `store` and must differ: a zero-length
    /// path is not something the engine produces.
    pub fn new(store: &'a EntityStore, source: &PersonId, target: &PersonId, mut frontier: F) -> Result<Self> {
        if source == target {
            return Err(DegreesError::SamePerson(source.clone()));
        }
        store.person(source)?;
        store.person(target)?;

        frontier.add(SearchNode::root(source.clone()));
        Ok(Search {
            store,
            target: target.clone(),
            frontier,
            explored: HashSet::new(),
            nodes: Vec::new(),
            state: SearchState::Initialized,
            path: None,
        })
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    /// Expands one node and returns the resulting state. Once terminal,
    /// further calls are no-ops.
    pub fn step(&mut self) -> Result<SearchState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        if self.frontier.is_empty() {
            self.state = SearchState::Exhausted;
            return Ok(self.state);
        }
        self.state = SearchState::Expanding;

        let node = self.frontier.remove()?;
        let current = node.state.clone();
        self.explored.insert(current.clone());
        let parent: NodeIndex = self.nodes.len();
        self.nodes.push(node);

        for (movie, person) in self.store.neighbors_of(&current)? {
            // explored also filters the self-edge
            if self.explored.contains(&person) || self.frontier.contains_state(&person) {
                continue;
            }
            let child = SearchNode::child(person, parent, movie);
            if child.state == self.target {
                self.path = Some(self.reconstruct(&child));
                self.state = SearchState::Found;
                return Ok(self.state);
            }
            self.frontier.add(child);
        }
        Ok(self.state)
    }

    /// Drives the search to a terminal state. `None` means not connected.
    pub fn run(mut self) -> Result<Option<Path>> {
        while !self.step()?.is_terminal() {}
        tracing::debug!(
            state = ?self.state,
            explored = self.explored.len(),
            "search finished"
        );
        Ok(self.path)
    }

    fn reconstruct(&self, terminal: &SearchNode) -> Path {
        let mut steps = Vec::new();
        let mut node = terminal;
        while let (Some(parent), Some(movie)) = (node.parent, &node.action) {
            steps.push(PathStep { movie: movie.clone(), person: node.state.clone() });
            node = &self.nodes[parent];
        }
        steps.reverse();
        steps
    }
}

/// Shortest path by edge count between two people, breadth-first.
///
/// Returns `Ok(None)` when they are not connected. Fails with
/// [`DegreesError::SamePerson`] when `source == target` and with
/// [`DegreesError::PersonNotFound`] for unknown ids.
pub fn find_path(store: &EntityStore, source: &PersonId, target: &PersonId) -> Result<Option<Path>> {
    tracing::debug!(%source, %target, "breadth-first search");
    Search::new(store, source, target, QueueFrontier::new())?.run()
}

/// Depth-first variant of [`find_path`]. Finds *a* connecting path if one
/// exists, but it is generally not the shortest one.
pub fn find_path_depth_first(store: &EntityStore, source: &PersonId, target: &PersonId) -> Result<Option<Path>> {
    tracing::debug!(%source, %target, "depth-first search");
    Search::new(store, source, target, StackFrontier::new())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::store_from_casts;
    use std::collections::{HashMap, VecDeque};

    fn id(s: &str) -> PersonId {
        PersonId::from(s)
    }

    /// Plain BFS over the co-star graph, independent of the engine.
    fn distances_from(store: &EntityStore, start: &PersonId) -> HashMap<PersonId, usize> {
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();
        distances.insert(start.clone(), 0);
        queue.push_back(start.clone());
        while let Some(current) = queue.pop_front() {
            let depth = distances[&current];
            for (_, neighbor) in store.neighbors_of(&current).unwrap() {
                if !distances.contains_key(&neighbor) {
                    distances.insert(neighbor.clone(), depth + 1);
                    queue.push_back(neighbor);
                }
            }
        }
        distances
    }

    fn assert_valid_path(store: &EntityStore, source: &PersonId, path: &Path) {
        let mut previous = source.clone();
        for step in path {
            let movie = store.movie(&step.movie).unwrap();
            assert!(movie.stars.contains(&previous), "{} not in {}", previous, step.movie);
            assert!(movie.stars.contains(&step.person), "{} not in {}", step.person, step.movie);
            previous = step.person.clone();
        }
    }

    const PEOPLE: &[&str] = &["a", "b", "c", "d", "e", "f", "g", "h", "x", "y"];

    fn small_graph() -> EntityStore {
        // a-b-c-d chain with a shortcut a..d via m5, e/f/g hanging off c,
        // h isolated, x-y a separate component
        store_from_casts(
            PEOPLE,
            &[
                ("m1", &["a", "b"]),
                ("m2", &["b", "c"]),
                ("m3", &["c", "d"]),
                ("m4", &["c", "e", "f"]),
                ("m5", &["a", "g", "d"]),
                ("m6", &["f", "g"]),
                ("m7", &["x", "y"]),
                ("m8", &["h"]),
            ],
        )
    }

    #[test]
    fn test_two_degrees_exact_path() {
        let store = store_from_casts(&["A", "B", "C"], &[("M", &["A", "B"]), ("N", &["B", "C"])]);
        let path = find_path(&store, &id("A"), &id("C")).unwrap();
        assert_eq!(path, Some(vec![PathStep::new("M", "B"), PathStep::new("N", "C")]));
    }

    #[test]
    fn test_direct_costars_are_one_degree() {
        let store = small_graph();
        let path = find_path(&store, &id("a"), &id("b")).unwrap().unwrap();
        assert_eq!(path, vec![PathStep::new("m1", "b")]);
    }

    #[test]
    fn test_path_length_matches_bfs_distance_for_all_pairs() {
        let store = small_graph();
        for source in PEOPLE {
            let source = id(source);
            let distances = distances_from(&store, &source);
            for target in PEOPLE {
                let target = id(target);
                if source == target {
                    continue;
                }
                let path = find_path(&store, &source, &target).unwrap();
                match distances.get(&target) {
                    Some(distance) => {
                        let path = path.expect("reachable pair must have a path");
                        assert_eq!(path.len(), *distance, "{} -> {}", source, target);
                        assert_eq!(path.last().map(|s| &s.person), Some(&target));
                        assert_valid_path(&store, &source, &path);
                    }
                    None => assert!(path.is_none(), "{} -> {} should be unreachable", source, target),
                }
            }
        }
    }

    #[test]
    fn test_disconnected_components_exhaust() {
        let store = small_graph();
        let mut search = Search::new(&store, &id("a"), &id("x"), QueueFrontier::new()).unwrap();
        assert_eq!(search.state(), SearchState::Initialized);
        while !search.step().unwrap().is_terminal() {}
        assert_eq!(search.state(), SearchState::Exhausted);
        assert_eq!(search.explored_count(), 7); // a..g

        assert_eq!(find_path(&store, &id("a"), &id("x")).unwrap(), None);
        assert_eq!(find_path(&store, &id("h"), &id("a")).unwrap(), None);
    }

    #[test]
    fn test_step_after_found_is_noop() {
        let store = small_graph();
        let mut search = Search::new(&store, &id("a"), &id("d"), QueueFrontier::new()).unwrap();
        assert_eq!(search.step().unwrap(), SearchState::Found); // d is a direct co-star of a
        assert_eq!(search.step().unwrap(), SearchState::Found);
        assert_eq!(search.run().unwrap(), Some(vec![PathStep::new("m5", "d")]));
    }

    #[test]
    fn test_same_person_is_rejected() {
        let store = small_graph();
        assert!(matches!(
            find_path(&store, &id("a"), &id("a")),
            Err(DegreesError::SamePerson(p)) if p == id("a")
        ));
    }

    #[test]
    fn test_unknown_person_is_rejected() {
        let store = small_graph();
        assert!(matches!(
            find_path(&store, &id("a"), &id("nobody")),
            Err(DegreesError::PersonNotFound(_))
        ));
        assert!(matches!(
            find_path(&store, &id("nobody"), &id("a")),
            Err(DegreesError::PersonNotFound(_))
        ));
    }

    #[test]
    fn test_depth_first_finds_a_valid_path() {
        let store = small_graph();
        let path = find_path_depth_first(&store, &id("b"), &id("e")).unwrap().unwrap();
        assert!(path.len() >= 2);
        assert_eq!(path.last().unwrap().person, id("e"));
        assert_valid_path(&store, &id("b"), &path);

        assert_eq!(find_path_depth_first(&store, &id("b"), &id("y")).unwrap(), None);
    }

    #[test]
    fn test_repeated_searches_are_independent() {
        let store = small_graph();
        let first = find_path(&store, &id("b"), &id("e")).unwrap();
        let second = find_path(&store, &id("b"), &id("e")).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.map(|p| p.len()), Some(2));
    }
}
