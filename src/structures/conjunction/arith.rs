/*!
Conjunctions of arithmetic literals.

An [ArithConj] holds three sorts of literals over
[linear combinations](crate::structures::term::LinearCombination):

- Positive equations, `lc = 0`.
- Negated equations, `lc ≠ 0`.
- Inequalities, `lc ≥ 0`.

Literals are kept canonical: equations are sign-normalised via
[as_equation_lhs](crate::structures::term::LinearCombination::as_equation_lhs),
lists are sorted descending and free of duplicates, and trivially true
literals are dropped at construction.
A conjunction with a trivially false literal collapses to the canonical
false conjunction, whose single positive equation is `1 = 0`.

Deciding non-trivial arithmetic is out of scope here: anything beyond
literal-level evaluation is the business of an injected
[reducer](crate::reduce::Reducer).
*/

use std::fmt;

use num_traits::Signed;

use crate::structures::term::{LinearCombination, TermOrder};

/// Normalises a list of equations `lc = 0` into canonical conjunction form:
/// sign-normalised, trivially true equations dropped, sorted descending,
/// duplicates removed.
///
/// None when some equation is trivially false, i.e. a nonzero integer.
pub fn normalize_equations(
    eqs: Vec<LinearCombination>,
    order: &TermOrder,
) -> Option<Vec<LinearCombination>> {
    let mut normal = Vec::with_capacity(eqs.len());
    for eq in eqs {
        if eq.is_zero() {
            continue;
        }
        if eq.is_int() {
            return None;
        }
        normal.push(eq.as_equation_lhs());
    }

    normal.sort_by(|a, b| b.compare_to(a, order));
    normal.dedup();
    Some(normal)
}

/// A conjunction of arithmetic literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ArithConj {
    /// Equations `lc = 0`, canonical.
    pos_eqs: Vec<LinearCombination>,

    /// Negated equations `lc ≠ 0`, canonical.
    neg_eqs: Vec<LinearCombination>,

    /// Inequalities `lc ≥ 0`, sorted, no duplicates.
    ineqs: Vec<LinearCombination>,
}

impl ArithConj {
    /// The empty, trivially true, conjunction.
    pub fn top() -> Self {
        ArithConj::default()
    }

    /// The canonical false conjunction, `1 = 0`.
    pub fn bottom() -> Self {
        ArithConj {
            pos_eqs: vec![LinearCombination::int(1)],
            neg_eqs: Vec::default(),
            ineqs: Vec::default(),
        }
    }

    /// A new conjunction of the given literals, canonicalised.
    ///
    /// Trivially true literals are dropped; a trivially false literal
    /// collapses the conjunction to [bottom](Self::bottom).
    pub fn new(
        pos_eqs: Vec<LinearCombination>,
        neg_eqs: Vec<LinearCombination>,
        ineqs: Vec<LinearCombination>,
        order: &TermOrder,
    ) -> Self {
        let pos_eqs = match normalize_equations(pos_eqs, order) {
            Some(eqs) => eqs,
            None => return ArithConj::bottom(),
        };

        let mut kept_neg = Vec::with_capacity(neg_eqs.len());
        for eq in neg_eqs {
            if eq.is_zero() {
                return ArithConj::bottom();
            }
            if eq.is_int() {
                continue;
            }
            kept_neg.push(eq.as_equation_lhs());
        }
        kept_neg.sort_by(|a, b| b.compare_to(a, order));
        kept_neg.dedup();

        let mut kept_ineqs = Vec::with_capacity(ineqs.len());
        for ineq in ineqs {
            if let Some(value) = ineq.int_value() {
                match value.is_negative() {
                    true => return ArithConj::bottom(),
                    false => continue,
                }
            }
            kept_ineqs.push(ineq);
        }
        kept_ineqs.sort_by(|a, b| b.compare_to(a, order));
        kept_ineqs.dedup();

        ArithConj { pos_eqs, neg_eqs: kept_neg, ineqs: kept_ineqs }
    }

    /// A conjunction of equations alone.
    pub fn from_equations(eqs: Vec<LinearCombination>, order: &TermOrder) -> Self {
        ArithConj::new(eqs, Vec::default(), Vec::default(), order)
    }

    /// This conjunction with its positive equations replaced by `eqs`.
    pub fn update_positive_eqs(&self, eqs: Vec<LinearCombination>, order: &TermOrder) -> Self {
        ArithConj::new(eqs, self.neg_eqs.clone(), self.ineqs.clone(), order)
    }

    pub fn pos_eqs(&self) -> &[LinearCombination] {
        &self.pos_eqs
    }

    pub fn neg_eqs(&self) -> &[LinearCombination] {
        &self.neg_eqs
    }

    pub fn ineqs(&self) -> &[LinearCombination] {
        &self.ineqs
    }

    /// Whether the conjunction has no literals.
    pub fn is_true(&self) -> bool {
        self.pos_eqs.is_empty() && self.neg_eqs.is_empty() && self.ineqs.is_empty()
    }

    /// Whether some literal is trivially false.
    ///
    /// Canonical conjunctions contain a trivially false literal only in the
    /// form [bottom](Self::bottom).
    pub fn is_false(&self) -> bool {
        self.pos_eqs.iter().any(|eq| eq.is_int() && !eq.is_zero())
            || self.neg_eqs.iter().any(LinearCombination::is_zero)
            || self
                .ineqs
                .iter()
                .any(|ineq| ineq.int_value().is_some_and(Signed::is_negative))
    }

    /// An iterator over every literal of the conjunction.
    pub fn literals(&self) -> impl Iterator<Item = &LinearCombination> {
        self.pos_eqs.iter().chain(self.neg_eqs.iter()).chain(self.ineqs.iter())
    }

    /// Whether some literal mentions a constant.
    pub fn contains_constant(&self) -> bool {
        self.literals().any(|lc| lc.contains_constant())
    }

    /// The conjunction with variables `depth..` substituted as detailed at
    /// [LinearCombination::subst_variables], re-canonicalised.
    pub fn subst_variables(
        &self,
        terms: &[LinearCombination],
        depth: u32,
        order: &TermOrder,
    ) -> Self {
        let replace = |lcs: &[LinearCombination]| {
            lcs.iter()
                .map(|lc| lc.subst_variables(terms, depth, order))
                .collect()
        };

        ArithConj::new(
            replace(&self.pos_eqs),
            replace(&self.neg_eqs),
            replace(&self.ineqs),
            order,
        )
    }

    /// Whether every literal list is sorted by `order`.
    pub fn is_sorted_by(&self, order: &TermOrder) -> bool {
        let sorted = |lcs: &[LinearCombination]| {
            lcs.iter().all(|lc| lc.is_sorted_by(order))
                && lcs
                    .windows(2)
                    .all(|pair| pair[0].compare_to(&pair[1], order).is_gt())
        };

        sorted(&self.pos_eqs) && sorted(&self.neg_eqs) && sorted(&self.ineqs)
    }

    /// The conjunction rebuilt under `order`.
    pub fn sort_by(&self, order: &TermOrder) -> Self {
        let arrange = |lcs: &[LinearCombination]| {
            lcs.iter().map(|lc| lc.sort_by(order)).collect()
        };

        ArithConj::new(
            arrange(&self.pos_eqs),
            arrange(&self.neg_eqs),
            arrange(&self.ineqs),
            order,
        )
    }
}

impl fmt::Display for ArithConj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_true() {
            return write!(f, "⊤");
        }

        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            match first {
                true => first = false,
                false => write!(f, " ∧ ")?,
            }
            Ok(())
        };

        for eq in &self.pos_eqs {
            sep(f)?;
            write!(f, "{eq} = 0")?;
        }
        for eq in &self.neg_eqs {
            sep(f)?;
            write!(f, "{eq} ≠ 0")?;
        }
        for ineq in &self.ineqs {
            sep(f)?;
            write!(f, "{ineq} ≥ 0")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::{Constant, Symbol};
    use num_bigint::BigInt;

    #[test]
    fn trivial_equations_are_dropped() {
        let order = TermOrder::empty();

        let conj = ArithConj::from_equations(vec![LinearCombination::zero()], &order);

        assert!(conj.is_true());
    }

    #[test]
    fn false_equations_collapse() {
        let order = TermOrder::empty();

        let conj = ArithConj::from_equations(vec![LinearCombination::int(2)], &order);

        assert_eq!(conj, ArithConj::bottom());
        assert!(conj.is_false());
    }

    #[test]
    fn sign_normalisation_merges_mirrored_equations() {
        let a = Constant::new("a");
        let order = TermOrder::empty().extend(a.clone());

        let eq = LinearCombination::sum(
            vec![(BigInt::from(1), Symbol::Constant(a))],
            BigInt::from(-1),
            &order,
        );

        let conj = ArithConj::from_equations(vec![eq.clone(), eq.negate()], &order);

        assert_eq!(conj.pos_eqs().len(), 1);
    }
}
