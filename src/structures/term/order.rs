/*!
A total order on the symbols terms are built from.

Every canonical structure — a linear combination, an atom, a conjunction —
is sorted with respect to some [TermOrder], and most operations require their
arguments to be sorted by the *same* order.
Structures carry an `is_sorted_by` method for this purpose, checked via
`debug_assert!` at the entry of order-sensitive operations.

The order places every variable above every constant, and orders:
- Variables by De Bruijn index.
- Constants by registration, with later constants above earlier ones.

Variables above constants matters for [equation reduction](crate::reduce::ReduceWithEqs):
an equation relating a bound variable to ground terms has the variable as its
leading symbol, and so rewrites the variable away.
*/

use std::cmp::Ordering;
use std::collections::HashMap;

use super::{Constant, Symbol};

/// A total order on [Symbol]s, determined by the registration sequence of constants.
#[derive(Clone, Debug, Default)]
pub struct TermOrder {
    /// Constants in registration sequence.
    constants: Vec<Constant>,

    /// The rank of each registered constant, derived from `constants`.
    rank: HashMap<Constant, usize>,
}

impl PartialEq for TermOrder {
    fn eq(&self, other: &Self) -> bool {
        self.constants == other.constants
    }
}

impl Eq for TermOrder {}

impl TermOrder {
    /// The order over no constants.
    pub fn empty() -> Self {
        TermOrder::default()
    }

    /// This order, extended with `constant` as the fresh largest constant.
    pub fn extend(&self, constant: Constant) -> Self {
        debug_assert!(
            !self.knows(&constant),
            "Constant {constant} registered twice"
        );

        let mut extended = self.clone();
        extended.rank.insert(constant.clone(), extended.constants.len());
        extended.constants.push(constant);
        extended
    }

    /// This order, extended with each constant in turn.
    pub fn extended_by(&self, constants: impl IntoIterator<Item = Constant>) -> Self {
        let mut order = self.clone();
        for constant in constants {
            order = order.extend(constant);
        }
        order
    }

    /// Whether `constant` has been registered with this order.
    pub fn knows(&self, constant: &Constant) -> bool {
        self.rank.contains_key(constant)
    }

    /// A count of the registered constants.
    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    /// Compares two symbols.
    ///
    /// Every variable is above every constant, so ground and non-ground
    /// summands never interleave in a sorted linear combination.
    pub fn compare(&self, a: &Symbol, b: &Symbol) -> Ordering {
        match (a, b) {
            (Symbol::Variable(i), Symbol::Variable(j)) => i.cmp(j),

            (Symbol::Variable(_), Symbol::Constant(_)) => Ordering::Greater,

            (Symbol::Constant(_), Symbol::Variable(_)) => Ordering::Less,

            (Symbol::Constant(x), Symbol::Constant(y)) => {
                self.rank_of(x).cmp(&self.rank_of(y))
            }
        }
    }

    fn rank_of(&self, constant: &Constant) -> usize {
        match self.rank.get(constant) {
            Some(rank) => *rank,

            None => panic!("! Constant {constant} is not sorted by this order"),
        }
    }
}
