/*!
Predicate symbols and atoms.

An [Atom] is a [Predicate] applied to as many
[linear combinations](crate::structures::term::LinearCombination) as the
predicate's arity.
A *fact* is a ground atom, believed true when held positively and false when
held negatively by a [PredConj](crate::structures::pred_conj::PredConj).

Two atoms are equal exactly when their predicates and argument combinations
are equal, and arguments are kept canonical by the order which created them.
*/

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::structures::term::{LinearCombination, TermOrder};

/// An uninterpreted predicate symbol of fixed arity.
///
/// Predicates are interned by name: clones share the backing string, and
/// equality and hashing go through name and arity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Predicate {
    name: Rc<str>,
    arity: usize,
}

impl Predicate {
    pub fn new(name: &str, arity: usize) -> Self {
        Predicate { name: Rc::from(name), arity }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// A predicate applied to argument terms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom {
    pred: Predicate,
    args: Vec<LinearCombination>,
}

impl Atom {
    /// A new atom. The argument count must match the arity of the predicate.
    pub fn new(pred: Predicate, args: Vec<LinearCombination>) -> Self {
        debug_assert_eq!(
            pred.arity(),
            args.len(),
            "Argument count conflicts with the arity of {pred}"
        );

        Atom { pred, args }
    }

    pub fn pred(&self) -> &Predicate {
        &self.pred
    }

    pub fn args(&self) -> &[LinearCombination] {
        &self.args
    }

    /// The argument at `index`.
    ///
    /// Panics if `index` is at least the arity of the predicate.
    pub fn arg(&self, index: usize) -> &LinearCombination {
        &self.args[index]
    }

    /// Whether no argument mentions a bound variable.
    pub fn is_ground(&self) -> bool {
        !self.args.iter().any(LinearCombination::contains_variable)
    }

    /// Whether some argument mentions a constant.
    pub fn contains_constant(&self) -> bool {
        self.args.iter().any(LinearCombination::contains_constant)
    }

    /// The equations under which this atom and `other` denote the same
    /// ground literal: the pairwise differences of their arguments.
    ///
    /// Returns None when some difference is a nonzero integer, as the atoms
    /// then cannot unify. Trivial differences are dropped.
    pub fn unification_conditions(
        &self,
        other: &Atom,
        order: &TermOrder,
    ) -> Option<Vec<LinearCombination>> {
        debug_assert_eq!(
            self.pred, other.pred,
            "Unification of atoms with distinct predicates"
        );

        let mut conditions = Vec::with_capacity(self.args.len());
        for (left, right) in self.args.iter().zip(other.args.iter()) {
            let difference = left.sub(right, order);

            if difference.is_zero() {
                continue;
            }
            if difference.is_int() {
                return None;
            }

            conditions.push(difference.as_equation_lhs());
        }

        Some(conditions)
    }

    /// As [unification_conditions](Self::unification_conditions), with the
    /// resulting equations normalised into a canonical conjunction: sorted
    /// descending and free of duplicates.
    pub fn unify(&self, other: &Atom, order: &TermOrder) -> Option<Vec<LinearCombination>> {
        let mut eqs = self.unification_conditions(other, order)?;
        eqs.sort_by(|a, b| b.compare_to(a, order));
        eqs.dedup();
        Some(eqs)
    }

    /// A total comparison of atoms sorted by `order`: by predicate, then by
    /// arguments.
    pub fn compare_to(&self, other: &Atom, order: &TermOrder) -> Ordering {
        match self.pred.name().cmp(other.pred.name()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        match self.pred.arity().cmp(&other.pred.arity()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }

        for (left, right) in self.args.iter().zip(other.args.iter()) {
            match left.compare_to(right, order) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }

        Ordering::Equal
    }

    /// The atom with variables `depth..` substituted as detailed at
    /// [LinearCombination::subst_variables].
    pub fn subst_variables(
        &self,
        terms: &[LinearCombination],
        depth: u32,
        order: &TermOrder,
    ) -> Self {
        Atom {
            pred: self.pred.clone(),
            args: self
                .args
                .iter()
                .map(|arg| arg.subst_variables(terms, depth, order))
                .collect(),
        }
    }

    /// Whether every argument is sorted by `order`.
    pub fn is_sorted_by(&self, order: &TermOrder) -> bool {
        self.args.iter().all(|arg| arg.is_sorted_by(order))
    }

    /// The atom with every argument re-sorted under `order`.
    pub fn sort_by(&self, order: &TermOrder) -> Self {
        Atom {
            pred: self.pred.clone(),
            args: self.args.iter().map(|arg| arg.sort_by(order)).collect(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.pred.name())?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::Constant;

    fn setup() -> (Constant, Constant, TermOrder) {
        let a = Constant::new("a");
        let b = Constant::new("b");
        let order = TermOrder::empty().extend(a.clone()).extend(b.clone());
        (a, b, order)
    }

    #[test]
    fn unification_of_equal_atoms_is_trivial() {
        let (a, _, order) = setup();
        let p = Predicate::new("p", 1);

        let fact = Atom::new(p, vec![LinearCombination::constant(a)]);

        assert_eq!(fact.unify(&fact.clone(), &order), Some(vec![]));
    }

    #[test]
    fn unification_against_a_variable_yields_an_equation() {
        let (a, _, order) = setup();
        let p = Predicate::new("p", 1);

        let pattern = Atom::new(p.clone(), vec![LinearCombination::variable(0)]);
        let fact = Atom::new(p, vec![LinearCombination::constant(a.clone())]);

        let eqs = pattern.unify(&fact, &order).expect("unifiable");
        assert_eq!(eqs.len(), 1);
        assert_eq!(
            eqs[0],
            LinearCombination::variable(0).sub(&LinearCombination::constant(a), &order)
        );
    }

    #[test]
    fn offset_arguments_cannot_unify() {
        let (a, _, order) = setup();
        let p = Predicate::new("p", 1);

        let left = Atom::new(p.clone(), vec![LinearCombination::constant(a.clone())]);
        let right = Atom::new(
            p,
            vec![LinearCombination::constant(a).add(&LinearCombination::int(1), &order)],
        );

        assert_eq!(left.unify(&right, &order), None);
    }
}
