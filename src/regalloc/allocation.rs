use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use thiserror::Error;

use crate::utils::{GraphError, InterferenceGraph, MinHeap};

use super::VisitOrder;

/// A register number, counted from 1.
pub type Register = u32;

/// The result of a successful allocation: one register per vertex.
pub type RegisterAssignment<T> = HashMap<T, Register>;

/// Why [`Allocator::run`] produced no assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError<T> {
  #[error("{0}")]
  Graph(GraphError<T>),
  #[error("no register in 1..={num_registers} is free for {vertex}")]
  Infeasible { vertex: T, num_registers: Register },
}

impl<T> From<GraphError<T>> for AllocError<T> {
  fn from(e: GraphError<T>) -> Self {
    AllocError::Graph(e)
  }
}

/// Greedy sequential coloring of an interference graph.
///
/// Vertices are visited in `order`; each one gets the lowest register that
/// none of its already-colored neighbors holds. With at least `max_degree + 1`
/// registers this never runs out, whatever the order.
#[derive(Copy, Clone, Debug)]
pub struct Allocator {
  /// Registers `1..=num_registers` are available.
  pub num_registers: Register,
  /// The order in which vertices are colored.
  pub order: VisitOrder,
}

impl Allocator {
  pub fn new(num_registers: Register) -> Self {
    Allocator {
      num_registers,
      order: VisitOrder::default(),
    }
  }

  pub fn with_order(mut self, order: VisitOrder) -> Self {
    self.order = order;
    self
  }

  /// Color `graph`. A graph without vertices yields an empty assignment.
  pub fn run<T>(&self, graph: &InterferenceGraph<T>) -> Result<RegisterAssignment<T>, AllocError<T>>
  where
    T: Hash + Eq + Clone + Display,
  {
    let order = self.order.generate(graph)?;
    log::debug!(
      "Coloring {} vertices with {} registers, {} order",
      order.len(),
      self.num_registers,
      self.order.as_ref()
    );
    self.color_graph(&order, graph)
  }

  /// Build the interference graph from `edges` and color it.
  ///
  /// Never fails: a rejected edge or a register shortage both give an empty
  /// assignment. Use [`Allocator::run`] to tell them apart from a graph that
  /// simply has no vertices.
  pub fn assign<T, I>(&self, edges: I) -> RegisterAssignment<T>
  where
    T: Hash + Eq + Clone + Display,
    I: IntoIterator<Item = (T, T)>,
  {
    let graph = match InterferenceGraph::try_from_edges(edges) {
      Ok(graph) => graph,
      Err(e) => {
        log::warn!("Cannot build interference graph: {}", e);
        return RegisterAssignment::new();
      }
    };

    match self.run(&graph) {
      Ok(assignment) => assignment,
      Err(e) => {
        log::warn!("Register allocation failed: {}", e);
        RegisterAssignment::new()
      }
    }
  }

  /// For the given order of nodes, we visit every neighbor of that node, and
  /// assign that node the lowest register not used by any neighbor.
  fn color_graph<T>(
    &self,
    order: &[T],
    graph: &InterferenceGraph<T>,
  ) -> Result<RegisterAssignment<T>, AllocError<T>>
  where
    T: Hash + Eq + Clone + Display,
  {
    let mut node_to_reg = RegisterAssignment::with_capacity(order.len());

    for node in order {
      // collect all the colored neighbors' registers
      let mut neighbor_regs: MinHeap<Register> = graph
        .neighbors(node)?
        .iter()
        .filter_map(|n| node_to_reg.get(n).copied())
        .collect();

      let reg = neighbor_regs.find_smallest_absent(1);
      if reg > self.num_registers {
        // partial work is dropped
        return Err(AllocError::Infeasible {
          vertex: node.clone(),
          num_registers: self.num_registers,
        });
      }

      log::debug!("{} -> {}", node, reg);
      node_to_reg.insert(node.clone(), reg);
    }

    Ok(node_to_reg)
  }
}

/// Build an interference graph from `edges` and assign each vertex a register
/// in `1..=num_registers`, visiting vertices in first-seen order.
///
/// Returns an empty map when the registers do not suffice.
pub fn assign_registers<T, I>(edges: I, num_registers: Register) -> RegisterAssignment<T>
where
  T: Hash + Eq + Clone + Display,
  I: IntoIterator<Item = (T, T)>,
{
  Allocator::new(num_registers).assign(edges)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::regalloc::check_assignment;

  const ORDERS: [VisitOrder; 3] = [
    VisitOrder::FirstSeen,
    VisitOrder::MaxCardinality,
    VisitOrder::LargestDegree,
  ];

  fn edges(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
      .iter()
      .map(|(v, w)| (v.to_string(), w.to_string()))
      .collect()
  }

  fn triangle() -> Vec<(String, String)> {
    edges(&[("a", "b"), ("b", "c"), ("c", "a")])
  }

  /// Deterministic pseudo-random graph on `n` vertices.
  fn scrambled_graph(n: u32, seed: u64) -> Vec<(u32, u32)> {
    let mut state = seed;
    let mut next = move || {
      state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
      (state >> 33) as u32
    };

    let mut pairs = vec![];
    for v in 0..n {
      for w in (v + 1)..n {
        if next() % 3 == 0 {
          pairs.push((v, w));
        }
      }
    }
    pairs
  }

  #[test]
  fn test_path_two_registers() {
    let r = assign_registers(edges(&[("a", "b"), ("b", "c")]), 2);
    assert_eq!(r.len(), 3);
    assert_ne!(r["a"], r["b"]);
    assert_ne!(r["b"], r["c"]);
    assert_eq!(r["a"], 1);
    assert_eq!(r["b"], 2);
    assert_eq!(r["c"], 1);
  }

  #[test]
  fn test_triangle_two_registers_infeasible() {
    assert!(assign_registers(triangle(), 2).is_empty());
  }

  #[test]
  fn test_triangle_three_registers() {
    let r = assign_registers(triangle(), 3);
    assert_eq!(r.len(), 3);
    assert_ne!(r["a"], r["b"]);
    assert_ne!(r["b"], r["c"]);
    assert_ne!(r["a"], r["c"]);
    assert!(r.values().all(|reg| (1..=3).contains(reg)));
  }

  #[test]
  fn test_empty_graph_is_success() {
    let r = assign_registers(Vec::<(String, String)>::new(), 1);
    assert!(r.is_empty());

    // no vertices is a success, not an infeasible allocation
    let graph: InterferenceGraph<String> = InterferenceGraph::new();
    assert_eq!(Allocator::new(1).run(&graph), Ok(RegisterAssignment::new()));
  }

  #[test]
  fn test_zero_registers() {
    let r = assign_registers(edges(&[("a", "b")]), 0);
    assert!(r.is_empty());

    let graph = InterferenceGraph::try_from_edges(edges(&[("a", "b")])).unwrap();
    assert!(matches!(
      Allocator::new(0).run(&graph),
      Err(AllocError::Infeasible { num_registers: 0, .. })
    ));
  }

  #[test]
  fn test_isolated_vertex_gets_first_register() {
    let mut graph = InterferenceGraph::try_from_edges(edges(&[("a", "b")])).unwrap();
    graph.add_vertex("lonely".to_string());
    let r = Allocator::new(2).run(&graph).unwrap();
    assert_eq!(r["lonely"], 1);
    assert_eq!(r.len(), 3);
  }

  #[test]
  fn test_infeasible_reports_vertex() {
    let graph = InterferenceGraph::try_from_edges(triangle()).unwrap();
    assert_eq!(
      Allocator::new(2).run(&graph),
      Err(AllocError::Infeasible {
        vertex: "c".to_string(),
        num_registers: 2,
      })
    );
  }

  #[test]
  fn test_self_loop_gives_empty_assignment() {
    assert!(assign_registers(edges(&[("a", "b"), ("a", "a")]), 4).is_empty());
  }

  #[test]
  fn test_lowest_free_register_is_chosen() {
    // d's neighbors hold 2 and 1, in that visit order; d must not take either
    let e = edges(&[("a", "b"), ("b", "c"), ("d", "b"), ("d", "c")]);
    let graph = InterferenceGraph::try_from_edges(e.clone()).unwrap();
    let r = assign_registers(e, 3);
    assert_eq!(r["a"], 1);
    assert_eq!(r["b"], 2);
    assert_eq!(r["c"], 1);
    assert_eq!(r["d"], 3);
    assert!(check_assignment(&graph, &r, 3).is_ok());
  }

  #[test]
  fn test_order_dependence() {
    // crown-like graph: bipartite, but first-seen greedy needs 3 registers
    let e = edges(&[
      ("a1", "b2"),
      ("b1", "a2"),
      ("a3", "b1"),
      ("a3", "b2"),
      ("b3", "a1"),
      ("b3", "a2"),
    ]);
    let graph = InterferenceGraph::try_from_edges(e.clone()).unwrap();
    let r = Allocator::new(3).run(&graph).unwrap();
    assert!(check_assignment(&graph, &r, 3).is_ok());
    assert!(r.values().any(|&reg| reg == 3));
    assert!(Allocator::new(2).run(&graph).is_err());
  }

  #[test]
  fn test_sample_graph() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("graphs/sample.csv");
    let e = crate::parse::parser::load(&path).unwrap();
    let graph = InterferenceGraph::try_from_edges(e.clone()).unwrap();
    assert_eq!(graph.max_degree(), 3);

    let r = assign_registers(e.clone(), 3);
    assert_eq!(r.len(), 6);
    assert!(check_assignment(&graph, &r, 3).is_ok());
    assert!(assign_registers(e, 2).is_empty());
  }

  #[test]
  fn test_max_degree_plus_one_always_succeeds() {
    for seed in 0..20 {
      let pairs = scrambled_graph(24, seed);
      let graph = InterferenceGraph::try_from_edges(pairs.clone()).unwrap();
      let k = graph.max_degree() as Register + 1;

      for order in ORDERS {
        let r = Allocator::new(k).with_order(order).run(&graph).unwrap();
        assert_eq!(r.len(), graph.num_vertices());
        assert!(check_assignment(&graph, &r, k).is_ok());
      }

      let r = assign_registers(pairs, k);
      assert_eq!(r.len(), graph.num_vertices());
    }
  }

  #[test]
  fn test_successful_assignments_are_proper() {
    for seed in 0..20 {
      let pairs = scrambled_graph(16, seed);
      let graph = InterferenceGraph::try_from_edges(pairs.clone()).unwrap();
      for k in 1..=graph.max_degree() as Register + 1 {
        for order in ORDERS {
          if let Ok(r) = Allocator::new(k).with_order(order).run(&graph) {
            for (v, w) in graph.edges() {
              assert_ne!(r[&v], r[&w]);
            }
            assert!(r.values().all(|&reg| reg >= 1 && reg <= k));
          }
        }
      }
    }
  }
}
