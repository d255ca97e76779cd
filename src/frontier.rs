//! Containers of search nodes waiting to be expanded.
//!
//! Both policies track the states they hold in a set, so
//! [`Frontier::contains_state`] is a hash lookup rather than a scan.
//! Only [`QueueFrontier`] gives breadth-first order and therefore shortest
//! paths; [`StackFrontier`] explores depth-first and makes no such promise.

use std::collections::{HashSet, VecDeque};

use crate::error::{DegreesError, Result};
use crate::store::{MovieId, PersonId};

/// Position of an expanded node in the search arena.
pub type NodeIndex = usize;

/// One position in the exploration tree. `parent` and `action` are both
/// `None` for the root and both `Some` for every other node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    pub state: PersonId,
    pub parent: Option<NodeIndex>,
    pub action: Option<MovieId>,
}

impl SearchNode {
    pub fn root(state: PersonId) -> Self {
        SearchNode { state, parent: None, action: None }
    }

    pub fn child(state: PersonId, parent: NodeIndex, action: MovieId) -> Self {
        SearchNode { state, parent: Some(parent), action: Some(action) }
    }
}

pub trait Frontier {
    fn add(&mut self, node: SearchNode);

    /// Takes the next node according to the policy.
    fn remove(&mut self) -> Result<SearchNode>;

    fn contains_state(&self, state: &PersonId) -> bool;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}

/// First in, first out: breadth-first exploration.
#[derive(Debug, Default)]
pub struct QueueFrontier {
    nodes: VecDeque<SearchNode>,
    states: HashSet<PersonId>,
}

impl QueueFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for QueueFrontier {
    fn add(&mut self, node: SearchNode) {
        self.states.insert(node.state.clone());
        self.nodes.push_back(node);
    }

    fn remove(&mut self) -> Result<SearchNode> {
        let node = self.nodes.pop_front().ok_or(DegreesError::EmptyFrontier)?;
        self.states.remove(&node.state);
        Ok(node)
    }

    fn contains_state(&self, state: &PersonId) -> bool {
        self.states.contains(state)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Last in, first out: depth-first exploration. Paths found with this
/// policy connect the two people but are not necessarily the shortest.
#[derive(Debug, Default)]
pub struct StackFrontier {
    nodes: Vec<SearchNode>,
    states: HashSet<PersonId>,
}

impl StackFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for StackFrontier {
    fn add(&mut self, node: SearchNode) {
        self.states.insert(node.state.clone());
        self.nodes.push(node);
    }

    fn remove(&mut self) -> Result<SearchNode> {
        let node = self.nodes.pop().ok_or(DegreesError::EmptyFrontier)?;
        self.states.remove(&node.state);
        Ok(node)
    }

    fn contains_state(&self, state: &PersonId) -> bool {
        self.states.contains(state)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
