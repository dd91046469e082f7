use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use thiserror::Error;

/// Misuse of an [`InterferenceGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<T> {
  #[error("Unknown vertex {0}")]
  UnknownVertex(T),
  #[error("Unknown edge {0} - {1}")]
  UnknownEdge(T, T),
  #[error("Vertex {0} cannot interfere with itself")]
  SelfLoop(T),
}

pub type GraphResult<T, R> = Result<R, GraphError<T>>;

/// Undirected interference graph over arbitrary vertices.
///
/// `vertex_set` and `adjacency` always hold the same keys, and adjacency is
/// symmetric. `order` remembers the order in which vertices were first added,
/// which is what the allocator visits by default.
#[derive(Clone, Debug)]
pub struct InterferenceGraph<T: Hash + Eq> {
  vertex_set: HashSet<T>,
  adjacency: HashMap<T, HashSet<T>>,
  order: Vec<T>,
  num_vertices: usize,
  num_edges: usize,
}

impl<T: Hash + Eq> Default for InterferenceGraph<T> {
  fn default() -> Self {
    InterferenceGraph {
      vertex_set: HashSet::new(),
      adjacency: HashMap::new(),
      order: Vec::new(),
      num_vertices: 0,
      num_edges: 0,
    }
  }
}

impl<T: Hash + Eq + Clone + Display> InterferenceGraph<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a graph from an edge stream, adding both endpoints of every edge
  /// before the edge itself.
  pub fn try_from_edges<I>(edges: I) -> GraphResult<T, Self>
  where
    I: IntoIterator<Item = (T, T)>,
  {
    let mut graph = Self::new();
    for (v, w) in edges {
      graph.add_vertex(v.clone());
      graph.add_vertex(w.clone());
      graph.add_edge(&v, &w)?;
    }
    Ok(graph)
  }

  pub fn contains(&self, vertex: &T) -> bool {
    self.vertex_set.contains(vertex)
  }

  fn expect_vertex(&self, vertex: &T) -> GraphResult<T, &HashSet<T>> {
    if !self.contains(vertex) {
      return Err(GraphError::UnknownVertex(vertex.clone()));
    }
    Ok(&self.adjacency[vertex])
  }

  /// Idempotently add a vertex into the graph
  pub fn add_vertex(&mut self, vertex: T) {
    if self.contains(&vertex) {
      return;
    }
    self.adjacency.insert(vertex.clone(), HashSet::new());
    self.order.push(vertex.clone());
    self.vertex_set.insert(vertex);
    self.num_vertices += 1;
  }

  /// Add an undirected edge between two known vertices.
  ///
  /// Re-adding an existing edge leaves both the adjacency and the edge count
  /// untouched.
  pub fn add_edge(&mut self, v: &T, w: &T) -> GraphResult<T, ()> {
    self.expect_vertex(v)?;
    self.expect_vertex(w)?;
    if v == w {
      return Err(GraphError::SelfLoop(v.clone()));
    }

    let inserted = self
      .adjacency
      .get_mut(v)
      .map_or(false, |neighbors| neighbors.insert(w.clone()));
    if let Some(neighbors) = self.adjacency.get_mut(w) {
      neighbors.insert(v.clone());
    }
    if inserted {
      self.num_edges += 1;
    }
    Ok(())
  }

  pub fn remove_edge(&mut self, v: &T, w: &T) -> GraphResult<T, ()> {
    if !self.expect_vertex(v)?.contains(w) {
      self.expect_vertex(w)?;
      return Err(GraphError::UnknownEdge(v.clone(), w.clone()));
    }

    if let Some(neighbors) = self.adjacency.get_mut(v) {
      neighbors.remove(w);
    }
    if let Some(neighbors) = self.adjacency.get_mut(w) {
      neighbors.remove(v);
    }
    self.num_edges -= 1;
    Ok(())
  }

  /// Remove a vertex together with every edge incident to it.
  pub fn remove_vertex(&mut self, vertex: &T) -> GraphResult<T, ()> {
    let neighbors: Vec<T> = self.expect_vertex(vertex)?.iter().cloned().collect();
    for neigh in neighbors.iter() {
      self.remove_edge(vertex, neigh)?;
    }

    self.adjacency.remove(vertex);
    self.vertex_set.remove(vertex);
    self.order.retain(|v| v != vertex);
    self.num_vertices -= 1;
    Ok(())
  }

  /// Snapshot of all vertices, in no particular order.
  pub fn vertices(&self) -> HashSet<T> {
    self.vertex_set.clone()
  }

  /// All vertices in the order they were first added.
  pub fn vertices_in_order(&self) -> &[T] {
    &self.order
  }

  pub fn neighbors(&self, vertex: &T) -> GraphResult<T, &HashSet<T>> {
    self.expect_vertex(vertex)
  }

  pub fn num_vertices(&self) -> usize {
    self.num_vertices
  }

  pub fn num_edges(&self) -> usize {
    self.num_edges
  }

  pub fn interferes(&self, v: &T, w: &T) -> GraphResult<T, bool> {
    let neighbors = self.expect_vertex(v)?;
    self.expect_vertex(w)?;
    Ok(neighbors.contains(w))
  }

  pub fn degree(&self, vertex: &T) -> GraphResult<T, usize> {
    self.expect_vertex(vertex).map(HashSet::len)
  }

  /// The largest degree over all vertices, 0 for an empty graph.
  pub fn max_degree(&self) -> usize {
    self
      .adjacency
      .values()
      .map(HashSet::len)
      .max()
      .unwrap_or(0)
  }

  /// Every undirected edge exactly once, oriented from the vertex that was
  /// added first.
  pub fn edges(&self) -> Vec<(T, T)> {
    let position: HashMap<&T, usize> = self.order.iter().enumerate().map(|(i, v)| (v, i)).collect();
    let mut edges = vec![];
    for v in self.order.iter() {
      for w in self.adjacency[v].iter() {
        if position[v] < position[w] {
          edges.push((v.clone(), w.clone()));
        }
      }
    }
    edges
  }
}
