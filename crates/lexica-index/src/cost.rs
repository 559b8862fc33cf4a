// Edit-cost contract consumed by the approximate search.

/// Insertion and deletion cost used when a cost model does not override it.
pub const DEFAULT_INDEL_COST: f64 = 1.0;

/// Cost model for the generalized edit distance between unit sequences.
///
/// The distance transforms a *query* sequence into an *indexed* sequence:
///
/// - `substitution(from, to)` replaces query unit `from` with indexed unit
///   `to`. It may be asymmetric and need not satisfy the triangle
///   inequality. It is only consulted for units that differ; equal units
///   always substitute for free.
/// - `insertion(unit)` inserts an indexed unit missing from the query.
/// - `deletion(unit)` drops a query unit absent from the indexed sequence.
///
/// All costs must be non-negative. The search prunes on that assumption.
pub trait EditCosts<U: ?Sized> {
    fn substitution(&self, from: &U, to: &U) -> f64;

    fn insertion(&self, _unit: &U) -> f64 {
        DEFAULT_INDEL_COST
    }

    fn deletion(&self, _unit: &U) -> f64 {
        DEFAULT_INDEL_COST
    }
}

/// The same cost for every substitution, insertion and deletion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformCosts {
    pub substitution: f64,
    pub insertion: f64,
    pub deletion: f64,
}

impl Default for UniformCosts {
    /// Plain Levenshtein distance: every operation costs 1.
    fn default() -> Self {
        Self {
            substitution: 1.0,
            insertion: DEFAULT_INDEL_COST,
            deletion: DEFAULT_INDEL_COST,
        }
    }
}

impl<U: ?Sized> EditCosts<U> for UniformCosts {
    fn substitution(&self, _from: &U, _to: &U) -> f64 {
        self.substitution
    }

    fn insertion(&self, _unit: &U) -> f64 {
        self.insertion
    }

    fn deletion(&self, _unit: &U) -> f64 {
        self.deletion
    }
}

/// Substitution cost from a closure, with a fixed insertion/deletion cost.
pub struct FnCosts<F> {
    substitution: F,
    indel: f64,
}

impl<F> FnCosts<F> {
    pub fn new(substitution: F) -> Self {
        Self::with_indel(substitution, DEFAULT_INDEL_COST)
    }

    pub fn with_indel(substitution: F, indel: f64) -> Self {
        Self {
            substitution,
            indel,
        }
    }
}

impl<U: ?Sized, F> EditCosts<U> for FnCosts<F>
where
    F: Fn(&U, &U) -> f64,
{
    fn substitution(&self, from: &U, to: &U) -> f64 {
        (self.substitution)(from, to)
    }

    fn insertion(&self, _unit: &U) -> f64 {
        self.indel
    }

    fn deletion(&self, _unit: &U) -> f64 {
        self.indel
    }
}
