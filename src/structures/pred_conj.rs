/*!
Conjunctions of predicate literals.

A [PredConj] is a pair of atom sets, one per polarity: atoms held positively
are asserted, atoms held negatively are denied.
Each set is sorted by the order which created the conjunction and free of
duplicates, so two conjunctions are equal exactly when they are structurally
equal.

A ground [PredConj] is the *fact base* the
[matcher](crate::matcher::MatcherState) runs against; a non-ground one is
the literal part of a [clause](crate::structures::conjunction::Conjunction).
*/

use std::collections::HashSet;
use std::fmt;

use crate::structures::atom::{Atom, Predicate};
use crate::structures::term::{LinearCombination, TermOrder};

/// A conjunction of positive and negative predicate literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct PredConj {
    /// Atoms asserted by the conjunction, sorted, no duplicates.
    pos: Vec<Atom>,

    /// Atoms denied by the conjunction, sorted, no duplicates.
    neg: Vec<Atom>,
}

impl PredConj {
    /// The empty conjunction, true under every interpretation.
    pub fn top() -> Self {
        PredConj::default()
    }

    /// A new conjunction of the given literals, sorted by `order` with
    /// duplicates dropped per polarity.
    pub fn new(pos: Vec<Atom>, neg: Vec<Atom>, order: &TermOrder) -> Self {
        let arrange = |mut atoms: Vec<Atom>| {
            atoms.sort_by(|a, b| a.compare_to(b, order));
            atoms.dedup();
            atoms
        };

        PredConj { pos: arrange(pos), neg: arrange(neg) }
    }

    /// A conjunction of literal lists which are already sorted and free of
    /// duplicates, e.g. filtered out of an existing conjunction.
    ///
    /// # Soundness
    /// Well-defined only if each list is sorted by the order of the source
    /// conjunction and free of duplicates.
    pub(crate) fn from_sorted(pos: Vec<Atom>, neg: Vec<Atom>) -> Self {
        PredConj { pos, neg }
    }

    /// Whether the conjunction has no literals.
    pub fn is_true(&self) -> bool {
        self.pos.is_empty() && self.neg.is_empty()
    }

    pub fn positive_lits(&self) -> &[Atom] {
        &self.pos
    }

    pub fn negative_lits(&self) -> &[Atom] {
        &self.neg
    }

    /// The literals of the given polarity, in their stable order.
    pub fn lits(&self, negated: bool) -> &[Atom] {
        match negated {
            false => &self.pos,
            true => &self.neg,
        }
    }

    /// An iterator over every literal as a `(atom, negated)` pair, positive
    /// literals first.
    pub fn literals(&self) -> impl Iterator<Item = (&Atom, bool)> {
        self.pos
            .iter()
            .map(|atom| (atom, false))
            .chain(self.neg.iter().map(|atom| (atom, true)))
    }

    /// The positive literals whose predicate is `pred`, in stable order.
    pub fn positive_lits_with_pred<'a>(&'a self, pred: &'a Predicate) -> impl Iterator<Item = &'a Atom> {
        self.pos.iter().filter(move |atom| atom.pred() == pred)
    }

    /// The negative literals whose predicate is `pred`, in stable order.
    pub fn negative_lits_with_pred<'a>(&'a self, pred: &'a Predicate) -> impl Iterator<Item = &'a Atom> {
        self.neg.iter().filter(move |atom| atom.pred() == pred)
    }

    /// The literals of the given polarity whose predicate is `pred`.
    pub fn lits_with_pred<'a>(&'a self, pred: &'a Predicate, negated: bool) -> impl Iterator<Item = &'a Atom> {
        self.lits(negated).iter().filter(move |atom| atom.pred() == pred)
    }

    /// Splits this conjunction against `other`, per polarity, into the
    /// literals shared with `other` and the literals new to this
    /// conjunction: `(self ∩ other, self \ other)`.
    ///
    /// Both parts keep the order of this conjunction.
    pub fn diff(&self, other: &PredConj) -> (PredConj, PredConj) {
        let split = |mine: &[Atom], theirs: &[Atom]| {
            let known: HashSet<&Atom> = theirs.iter().collect();

            let mut shared = Vec::default();
            let mut added = Vec::default();
            for atom in mine {
                match known.contains(atom) {
                    true => shared.push(atom.clone()),
                    false => added.push(atom.clone()),
                }
            }
            (shared, added)
        };

        let (shared_pos, added_pos) = split(&self.pos, &other.pos);
        let (shared_neg, added_neg) = split(&self.neg, &other.neg);

        (
            PredConj { pos: shared_pos, neg: shared_neg },
            PredConj { pos: added_pos, neg: added_neg },
        )
    }

    /// Splits the conjunction by a predicate on atoms:
    /// `(literals satisfying f, the rest)`, per polarity.
    pub fn partition(&self, f: impl Fn(&Atom) -> bool) -> (PredConj, PredConj) {
        let (pos_in, pos_out): (Vec<Atom>, Vec<Atom>) =
            self.pos.iter().cloned().partition(|atom| f(atom));
        let (neg_in, neg_out): (Vec<Atom>, Vec<Atom>) =
            self.neg.iter().cloned().partition(|atom| f(atom));

        (
            PredConj { pos: pos_in, neg: neg_in },
            PredConj { pos: pos_out, neg: neg_out },
        )
    }

    /// Whether the conjunction holds `atom` with the given polarity.
    pub fn contains(&self, atom: &Atom, negated: bool) -> bool {
        self.lits(negated).contains(atom)
    }

    /// Whether every literal of this conjunction occurs in `other` with the
    /// same polarity.
    pub fn subset_of(&self, other: &PredConj) -> bool {
        let covers = |mine: &[Atom], theirs: &[Atom]| {
            let known: HashSet<&Atom> = theirs.iter().collect();
            mine.iter().all(|atom| known.contains(atom))
        };

        covers(&self.pos, &other.pos) && covers(&self.neg, &other.neg)
    }

    /// Whether some argument of some literal mentions a constant.
    pub fn contains_constant(&self) -> bool {
        self.literals().any(|(atom, _)| atom.contains_constant())
    }

    /// Whether some literal is ground.
    pub fn contains_ground_atom(&self) -> bool {
        self.literals().any(|(atom, _)| atom.is_ground())
    }

    /// The conjunction with variables `depth..` substituted as detailed at
    /// [LinearCombination::subst_variables], re-sorted.
    pub fn subst_variables(
        &self,
        terms: &[LinearCombination],
        depth: u32,
        order: &TermOrder,
    ) -> Self {
        PredConj::new(
            self.pos
                .iter()
                .map(|atom| atom.subst_variables(terms, depth, order))
                .collect(),
            self.neg
                .iter()
                .map(|atom| atom.subst_variables(terms, depth, order))
                .collect(),
            order,
        )
    }

    /// Whether both literal lists are sorted by `order`.
    pub fn is_sorted_by(&self, order: &TermOrder) -> bool {
        let sorted = |atoms: &[Atom]| {
            atoms.iter().all(|atom| atom.is_sorted_by(order))
                && atoms
                    .windows(2)
                    .all(|pair| pair[0].compare_to(&pair[1], order).is_lt())
        };

        sorted(&self.pos) && sorted(&self.neg)
    }

    /// The conjunction rebuilt under `order`.
    pub fn sort_by(&self, order: &TermOrder) -> Self {
        PredConj::new(
            self.pos.iter().map(|atom| atom.sort_by(order)).collect(),
            self.neg.iter().map(|atom| atom.sort_by(order)).collect(),
            order,
        )
    }
}

impl fmt::Display for PredConj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_true() {
            return write!(f, "⊤");
        }

        let mut first = true;
        for (atom, negated) in self.literals() {
            if !first {
                write!(f, " ∧ ")?;
            }
            first = false;
            match negated {
                false => write!(f, "{atom}")?,
                true => write!(f, "¬{atom}")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::Constant;

    fn facts() -> (PredConj, PredConj, TermOrder) {
        let a = Constant::new("a");
        let b = Constant::new("b");
        let order = TermOrder::empty().extend(a.clone()).extend(b.clone());
        let p = Predicate::new("p", 1);

        let p_a = Atom::new(p.clone(), vec![LinearCombination::constant(a)]);
        let p_b = Atom::new(p, vec![LinearCombination::constant(b)]);

        let just_a = PredConj::new(vec![p_a.clone()], vec![], &order);
        let both = PredConj::new(vec![p_a, p_b], vec![], &order);
        (just_a, both, order)
    }

    #[test]
    fn diff_splits_shared_and_added() {
        let (just_a, both, _) = facts();

        let (shared, added) = both.diff(&just_a);

        assert_eq!(shared, just_a);
        assert_eq!(added.positive_lits().len(), 1);
        assert_eq!(added.positive_lits()[0].to_string(), "p(b)");
    }

    #[test]
    fn duplicates_are_dropped() {
        let (just_a, _, order) = facts();
        let atom = just_a.positive_lits()[0].clone();

        let doubled = PredConj::new(vec![atom.clone(), atom], vec![], &order);

        assert_eq!(doubled, just_a);
    }

    #[test]
    fn subset_respects_polarity() {
        let (just_a, both, order) = facts();
        let atom = just_a.positive_lits()[0].clone();

        let negated = PredConj::new(vec![], vec![atom], &order);

        assert!(just_a.subset_of(&both));
        assert!(!negated.subset_of(&both));
    }
}
