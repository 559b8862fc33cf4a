// Bounded approximate search over the syllabic index.
//
// The generalized edit distance between the query and every indexed
// sequence is computed as a dynamic-programming table whose rows follow the
// tree: each unit on an edge derives one new row from its parent's row, so
// all words sharing a prefix share the rows of that prefix. Traversal uses
// an explicit depth-first stack. A branch is abandoned as soon as the
// smallest entry of its current row exceeds the budget, since with
// non-negative costs no descendant can do better.

use std::hash::Hash;

use crate::cost::EditCosts;
use crate::tree::{NodeId, SyllabicIndex};

/// A node found within the distance budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub node: NodeId,
    pub distance: f64,
}

/// One pending node of the traversal, with the DP row of its parent's
/// sequence.
struct Frame {
    node: NodeId,
    row: Vec<f64>,
}

impl<U, T> SyllabicIndex<U, T>
where
    U: Eq + Hash + Clone,
{
    /// Find every payload-carrying node whose unit sequence lies within
    /// `max_distance` of `query` under `costs`.
    ///
    /// Matches are reported in traversal order (depth-first, children in
    /// insertion order). No distance ordering is applied here.
    ///
    /// An empty query matches the sequences whose total insertion cost fits
    /// the budget. A budget of 0 finds exact matches only (plus sequences
    /// reachable through zero-cost operations, if the cost model has any).
    /// A negative or NaN budget matches nothing.
    pub fn approximate_search<C>(&self, query: &[U], max_distance: f64, costs: &C) -> Vec<Match>
    where
        C: EditCosts<U> + ?Sized,
    {
        let mut matches = Vec::new();
        if !(max_distance >= 0.0) {
            return matches;
        }

        let mut root_row = Vec::with_capacity(query.len() + 1);
        root_row.push(0.0);
        for (j, unit) in query.iter().enumerate() {
            root_row.push(root_row[j] + costs.deletion(unit));
        }

        let mut stack = vec![Frame {
            node: NodeId::ROOT,
            row: root_row,
        }];

        while let Some(Frame { node: id, mut row }) = stack.pop() {
            let node = &self.nodes[id.index()];

            let mut pruned = false;
            for unit in &node.label {
                row = next_row(query, &row, unit, costs);
                if row_min(&row) > max_distance {
                    pruned = true;
                    break;
                }
            }
            if pruned {
                continue;
            }

            let distance = row[query.len()];
            if !node.payload.is_empty() && distance <= max_distance {
                matches.push(Match { node: id, distance });
            }

            // Push in reverse so the first child is visited first; the
            // first child inherits the row without a copy.
            if let Some((&first, rest)) = node.children.split_first() {
                for &child in rest.iter().rev() {
                    stack.push(Frame {
                        node: child,
                        row: row.clone(),
                    });
                }
                stack.push(Frame { node: first, row });
            }
        }

        matches
    }
}

/// Derive the DP row after appending `unit` to the indexed sequence.
///
/// `prev[j]` is the distance from `query[..j]` to the parent sequence.
fn next_row<U, C>(query: &[U], prev: &[f64], unit: &U, costs: &C) -> Vec<f64>
where
    U: Eq,
    C: EditCosts<U> + ?Sized,
{
    let insertion = costs.insertion(unit);
    let mut row = Vec::with_capacity(prev.len());
    row.push(prev[0] + insertion);

    for (j, query_unit) in query.iter().enumerate() {
        let substitution = if query_unit == unit {
            0.0
        } else {
            costs.substitution(query_unit, unit)
        };
        let best = (prev[j] + substitution)
            .min(prev[j + 1] + insertion)
            .min(row[j] + costs.deletion(query_unit));
        row.push(best);
    }

    row
}

fn row_min(row: &[f64]) -> f64 {
    row.iter().copied().fold(f64::INFINITY, f64::min)
}

/// The arg-min group: every match tying at the smallest distance.
///
/// Relative order is preserved. Empty input gives empty output.
pub fn best_matches(matches: &[Match]) -> Vec<Match> {
    let min = matches
        .iter()
        .map(|m| m.distance)
        .fold(f64::INFINITY, f64::min);
    matches
        .iter()
        .filter(|m| m.distance == min)
        .copied()
        .collect()
}
