/*!
Ordered collections of negated sub-conjunctions.

A [NegatedConjunctions] is the list of clauses a
[Conjunction](super::Conjunction) denies: the parent asserts the negation of
each element.
The collection behaves as an ordered set — duplicates are dropped at
construction, and [diff](NegatedConjunctions::diff) and
[partition](NegatedConjunctions::partition) mirror the set operations of
[PredConj](crate::structures::pred_conj::PredConj).

The matcher state keeps its clauses in exactly this form: a clause is a
negated, existentially closed conjunction.
*/

use std::collections::HashSet;
use std::fmt;

use super::Conjunction;
use crate::structures::term::{LinearCombination, TermOrder};

/// An ordered duplicate-free collection of negated conjunctions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct NegatedConjunctions {
    conjs: Vec<Conjunction>,
}

impl NegatedConjunctions {
    /// The empty collection.
    pub fn empty() -> Self {
        NegatedConjunctions::default()
    }

    /// A new collection of the given conjunctions, first occurrences kept.
    ///
    /// A false conjunction is dropped: its negation is trivially true.
    pub fn new(conjs: Vec<Conjunction>, _order: &TermOrder) -> Self {
        let mut seen: HashSet<Conjunction> = HashSet::default();
        let mut kept = Vec::with_capacity(conjs.len());
        for conj in conjs {
            if conj.is_false() {
                continue;
            }
            if seen.insert(conj.clone()) {
                kept.push(conj);
            }
        }

        NegatedConjunctions { conjs: kept }
    }

    /// This collection if `conjs` holds the same elements, and a new
    /// collection of `conjs` otherwise.
    pub fn update(&self, conjs: Vec<Conjunction>, order: &TermOrder) -> Self {
        let fresh = NegatedConjunctions::new(conjs, order);
        match *self == fresh {
            true => self.clone(),
            false => fresh,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conjs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conjs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conjunction> {
        self.conjs.iter()
    }

    pub fn contains(&self, conj: &Conjunction) -> bool {
        self.conjs.contains(conj)
    }

    /// Whether some element is trivially true, making the negating parent
    /// false.
    pub fn contains_true(&self) -> bool {
        self.conjs.iter().any(Conjunction::is_true)
    }

    /// Splits this collection against `other` into the elements shared with
    /// `other` and the elements new to this collection:
    /// `(self ∩ other, self \ other)`, in the order of this collection.
    pub fn diff(&self, other: &NegatedConjunctions) -> (NegatedConjunctions, NegatedConjunctions) {
        let known: HashSet<&Conjunction> = other.conjs.iter().collect();

        let mut shared = Vec::default();
        let mut added = Vec::default();
        for conj in &self.conjs {
            match known.contains(conj) {
                true => shared.push(conj.clone()),
                false => added.push(conj.clone()),
            }
        }

        (
            NegatedConjunctions { conjs: shared },
            NegatedConjunctions { conjs: added },
        )
    }

    /// Splits the collection by a predicate on conjunctions:
    /// `(elements satisfying f, the rest)`.
    pub fn partition(
        &self,
        f: impl Fn(&Conjunction) -> bool,
    ) -> (NegatedConjunctions, NegatedConjunctions) {
        let (inside, outside): (Vec<Conjunction>, Vec<Conjunction>) =
            self.conjs.iter().cloned().partition(|conj| f(conj));

        (
            NegatedConjunctions { conjs: inside },
            NegatedConjunctions { conjs: outside },
        )
    }

    /// Whether some element mentions a constant.
    pub fn contains_constant(&self) -> bool {
        self.conjs.iter().any(Conjunction::contains_constant)
    }

    /// Whether some element contains a ground atom.
    pub fn contains_ground_atom(&self) -> bool {
        self.conjs.iter().any(Conjunction::contains_ground_atom)
    }

    /// Whether some element contains a predicate literal.
    pub fn contains_predicates(&self) -> bool {
        self.conjs.iter().any(Conjunction::contains_predicates)
    }

    /// The collection with variables `depth..` of each element substituted,
    /// where each element's own quantifier prefix deepens the substitution.
    pub fn subst_variables(
        &self,
        terms: &[LinearCombination],
        depth: u32,
        order: &TermOrder,
    ) -> Self {
        NegatedConjunctions::new(
            self.conjs
                .iter()
                .map(|conj| conj.subst_variables(terms, depth, order))
                .collect(),
            order,
        )
    }

    /// Whether every element is sorted by `order`.
    pub fn is_sorted_by(&self, order: &TermOrder) -> bool {
        self.conjs.iter().all(|conj| conj.is_sorted_by(order))
    }

    /// The collection rebuilt under `order`.
    pub fn sort_by(&self, order: &TermOrder) -> Self {
        NegatedConjunctions::new(
            self.conjs.iter().map(|conj| conj.sort_by(order)).collect(),
            order,
        )
    }
}

impl fmt::Display for NegatedConjunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, conj) in self.conjs.iter().enumerate() {
            if index > 0 {
                write!(f, " ∧ ")?;
            }
            write!(f, "¬({conj})")?;
        }

        Ok(())
    }
}
