use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use serde::Deserialize;
use strum_macros::{AsRefStr, EnumString};

use crate::utils::{GraphResult, InterferenceGraph};

/// The order in which the greedy coloring pass visits vertices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, EnumString, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VisitOrder {
  /// Order of first appearance in the edge stream.
  #[default]
  FirstSeen,
  /// Maximum cardinality search.
  MaxCardinality,
  /// Descending degree (Welsh-Powell).
  LargestDegree,
}

impl VisitOrder {
  pub fn generate<T>(self, graph: &InterferenceGraph<T>) -> GraphResult<T, Vec<T>>
  where
    T: Hash + Eq + Clone + Display,
  {
    match self {
      VisitOrder::FirstSeen => Ok(graph.vertices_in_order().to_vec()),
      VisitOrder::MaxCardinality => generate_simplicial_order(graph),
      VisitOrder::LargestDegree => largest_degree_order(graph),
    }
  }
}

/// Generate Simplicial Elimination Order using Maximum Cardinality Search
///
/// Note that for a chordal graph, the MCS algorithm is guaranteed to generate
/// a perfect elimination order. But for a non-chordal graph, the MCS still
/// generate a valid order. Ties go to the vertex that was added first.
fn generate_simplicial_order<T>(graph: &InterferenceGraph<T>) -> GraphResult<T, Vec<T>>
where
  T: Hash + Eq + Clone + Display,
{
  let vertices = graph.vertices_in_order();
  let index: HashMap<&T, usize> = vertices.iter().enumerate().map(|(i, v)| (v, i)).collect();

  let mut vertex_bucket = vec![0; vertices.len()];
  let mut visited = vec![false; vertices.len()];
  let mut buckets = vec![(0..vertices.len()).collect::<Vec<_>>()];
  let mut c = 0;

  let mut simplicial_order = Vec::with_capacity(vertices.len());
  for _ in 0..vertices.len() {
    // find a node in largest bucket, if it empty, decrement largest_bucket
    while buckets[c].is_empty() {
      c -= 1;
    }

    let Some((pos, &picked)) = buckets[c].iter().enumerate().min_by_key(|&(_, v)| *v) else {
      break;
    };
    buckets[c].swap_remove(pos);
    visited[picked] = true;
    simplicial_order.push(vertices[picked].clone());

    // move all unvisited neighbors of the picked node to the next bucket
    for neigh in graph.neighbors(&vertices[picked])? {
      let neigh = index[neigh];
      if visited[neigh] {
        continue;
      }

      let orig_bucket = vertex_bucket[neigh];
      let new_bucket = orig_bucket + 1;
      c = c.max(new_bucket);

      vertex_bucket[neigh] = new_bucket;
      if new_bucket >= buckets.len() {
        buckets.push(vec![]);
      }
      buckets[new_bucket].push(neigh);
      buckets[orig_bucket].retain(|&v| v != neigh);
    }
  }

  Ok(simplicial_order)
}

fn largest_degree_order<T>(graph: &InterferenceGraph<T>) -> GraphResult<T, Vec<T>>
where
  T: Hash + Eq + Clone + Display,
{
  let mut by_degree = graph
    .vertices_in_order()
    .iter()
    .map(|v| graph.degree(v).map(|d| (d, v)))
    .collect::<GraphResult<T, Vec<_>>>()?;
  // stable, so equal degrees keep first-seen order
  by_degree.sort_by(|a, b| b.0.cmp(&a.0));
  Ok(by_degree.into_iter().map(|(_, v)| v.clone()).collect())
}
