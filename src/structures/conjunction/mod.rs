/*!
Quantified conjunctions — the formulas the matcher produces and consumes.

A [Conjunction] is a quantifier prefix over a conjunction of arithmetic
literals, predicate literals, and negated sub-conjunctions.
Variables are nameless De Bruijn indices: the quantifier at position 0 of
the prefix is the innermost, binding
[Variable(0)](crate::structures::term::Symbol).

A *clause* for the matcher is a conjunction whose prefix is all-[EX](Quantifier::Ex):
the negation of a universally quantified disjunction.
This shape is an invariant of the
[matcher state](crate::matcher::MatcherState), enforced at every update.

Construction performs shallow normalisation only: a conjunction with a false
arithmetic part, or denying a trivially true sub-conjunction, collapses to
the canonical [bottom](Conjunction::bottom); a conjunction with no content
collapses to [top](Conjunction::top).
Everything deeper is the business of an injected
[reducer](crate::reduce::Reducer).
*/

use std::fmt;

mod arith;
pub use arith::{normalize_equations, ArithConj};

mod negated;
pub use negated::NegatedConjunctions;

use crate::structures::atom::Predicate;
use crate::structures::pred_conj::PredConj;
use crate::structures::term::{LinearCombination, TermOrder};

/// A quantifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// Existential quantification.
    Ex,

    /// Universal quantification.
    All,
}

impl Quantifier {
    /// The dual quantifier.
    pub fn dual(self) -> Self {
        match self {
            Quantifier::Ex => Quantifier::All,
            Quantifier::All => Quantifier::Ex,
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Ex => write!(f, "∃"),
            Quantifier::All => write!(f, "∀"),
        }
    }
}

/// A quantified conjunction of arithmetic literals, predicate literals, and
/// negated sub-conjunctions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Conjunction {
    /// The quantifier prefix, position 0 innermost.
    quans: Vec<Quantifier>,

    /// The arithmetic literals of the conjunction.
    arith: ArithConj,

    /// The predicate literals of the conjunction.
    preds: PredConj,

    /// The sub-conjunctions the conjunction denies.
    negated: NegatedConjunctions,
}

impl Conjunction {
    /// The canonical true conjunction.
    pub fn top() -> Self {
        Conjunction {
            quans: Vec::default(),
            arith: ArithConj::top(),
            preds: PredConj::top(),
            negated: NegatedConjunctions::empty(),
        }
    }

    /// The canonical false conjunction.
    pub fn bottom() -> Self {
        Conjunction {
            quans: Vec::default(),
            arith: ArithConj::bottom(),
            preds: PredConj::top(),
            negated: NegatedConjunctions::empty(),
        }
    }

    /// A new conjunction, shallowly normalised.
    pub fn new(
        quans: Vec<Quantifier>,
        arith: ArithConj,
        preds: PredConj,
        negated: NegatedConjunctions,
        _order: &TermOrder,
    ) -> Self {
        if arith.is_false() || negated.contains_true() {
            return Conjunction::bottom();
        }
        if arith.is_true() && preds.is_true() && negated.is_empty() {
            return Conjunction::top();
        }

        Conjunction { quans, arith, preds, negated }
    }

    /// A conjunction of equations alone.
    pub fn from_equations(eqs: Vec<LinearCombination>, order: &TermOrder) -> Self {
        Conjunction::new(
            Vec::default(),
            ArithConj::from_equations(eqs, order),
            PredConj::top(),
            NegatedConjunctions::empty(),
            order,
        )
    }

    pub fn quans(&self) -> &[Quantifier] {
        &self.quans
    }

    pub fn arith(&self) -> &ArithConj {
        &self.arith
    }

    pub fn preds(&self) -> &PredConj {
        &self.preds
    }

    pub fn negated(&self) -> &NegatedConjunctions {
        &self.negated
    }

    /// Whether the conjunction is the canonical true conjunction.
    pub fn is_true(&self) -> bool {
        self.quans.is_empty()
            && self.arith.is_true()
            && self.preds.is_true()
            && self.negated.is_empty()
    }

    /// Whether the arithmetic part of the conjunction is trivially false.
    pub fn is_false(&self) -> bool {
        self.arith.is_false()
    }

    /// Whether every quantifier of the prefix is existential.
    pub fn quans_all_ex(&self) -> bool {
        self.quans.iter().all(|quan| *quan == Quantifier::Ex)
    }

    /// Whether some part of the conjunction mentions a constant.
    pub fn contains_constant(&self) -> bool {
        self.arith.contains_constant()
            || self.preds.contains_constant()
            || self.negated.contains_constant()
    }

    /// Whether some part of the conjunction contains a ground atom.
    pub fn contains_ground_atom(&self) -> bool {
        self.preds.contains_ground_atom() || self.negated.contains_ground_atom()
    }

    /// Whether the conjunction or a sub-conjunction has predicate literals.
    pub fn contains_predicates(&self) -> bool {
        !self.preds.is_true() || self.negated.contains_predicates()
    }

    /// Whether `f` holds for the predicate of some literal of the
    /// conjunction or of a sub-conjunction.
    pub fn has_predicate_satisfying(&self, f: &dyn Fn(&Predicate) -> bool) -> bool {
        self.preds.literals().any(|(atom, _)| f(atom.pred()))
            || self
                .negated
                .iter()
                .any(|conj| conj.has_predicate_satisfying(f))
    }

    /// The conjunction with variables `depth..` substituted, where the own
    /// quantifier prefix deepens the substitution for every component.
    pub fn subst_variables(
        &self,
        terms: &[LinearCombination],
        depth: u32,
        order: &TermOrder,
    ) -> Self {
        let inner = depth + self.quans.len() as u32;

        Conjunction::new(
            self.quans.clone(),
            self.arith.subst_variables(terms, inner, order),
            self.preds.subst_variables(terms, inner, order),
            self.negated.subst_variables(terms, inner, order),
            order,
        )
    }

    /// The conjunction with its prefix discharged by the given terms:
    /// `terms[0]` replaces the variable of the innermost quantifier.
    ///
    /// The term count must match the prefix length.
    pub fn instantiate(&self, terms: &[LinearCombination], order: &TermOrder) -> Self {
        debug_assert_eq!(
            terms.len(),
            self.quans.len(),
            "Instantiation requires a term per quantifier"
        );

        Conjunction::new(
            Vec::default(),
            self.arith.subst_variables(terms, 0, order),
            self.preds.subst_variables(terms, 0, order),
            self.negated.subst_variables(terms, 0, order),
            order,
        )
    }

    /// Whether every component is sorted by `order`.
    pub fn is_sorted_by(&self, order: &TermOrder) -> bool {
        self.arith.is_sorted_by(order)
            && self.preds.is_sorted_by(order)
            && self.negated.is_sorted_by(order)
    }

    /// The conjunction rebuilt under `order`.
    pub fn sort_by(&self, order: &TermOrder) -> Self {
        Conjunction::new(
            self.quans.clone(),
            self.arith.sort_by(order),
            self.preds.sort_by(order),
            self.negated.sort_by(order),
            order,
        )
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_true() {
            return write!(f, "⊤");
        }
        if self.is_false() {
            return write!(f, "⊥");
        }

        for quan in self.quans.iter().rev() {
            write!(f, "{quan}.")?;
        }
        if !self.quans.is_empty() {
            write!(f, " ")?;
        }

        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            match first {
                true => first = false,
                false => write!(f, " ∧ ")?,
            }
            Ok(())
        };

        if !self.arith.is_true() {
            sep(f)?;
            write!(f, "{}", self.arith)?;
        }
        if !self.preds.is_true() {
            sep(f)?;
            write!(f, "{}", self.preds)?;
        }
        if !self.negated.is_empty() {
            sep(f)?;
            write!(f, "{}", self.negated)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::atom::{Atom, Predicate};
    use crate::structures::term::Constant;

    #[test]
    fn false_arithmetic_collapses() {
        let order = TermOrder::empty();

        let conj = Conjunction::from_equations(vec![LinearCombination::int(1)], &order);

        assert_eq!(conj, Conjunction::bottom());
    }

    #[test]
    fn no_content_collapses_to_top() {
        let order = TermOrder::empty();

        let conj = Conjunction::new(
            vec![Quantifier::Ex],
            ArithConj::top(),
            PredConj::top(),
            NegatedConjunctions::empty(),
            &order,
        );

        assert!(conj.is_true());
    }

    #[test]
    fn instantiation_discharges_the_prefix() {
        let a = Constant::new("a");
        let order = TermOrder::empty().extend(a.clone());
        let p = Predicate::new("p", 1);

        let clause = Conjunction::new(
            vec![Quantifier::Ex],
            ArithConj::top(),
            PredConj::new(
                vec![Atom::new(p.clone(), vec![LinearCombination::variable(0)])],
                vec![],
                &order,
            ),
            NegatedConjunctions::empty(),
            &order,
        );

        let instance = clause.instantiate(&[LinearCombination::constant(a.clone())], &order);

        assert!(instance.quans().is_empty());
        assert_eq!(
            instance.preds().positive_lits()[0],
            Atom::new(p, vec![LinearCombination::constant(a)])
        );
    }
}
