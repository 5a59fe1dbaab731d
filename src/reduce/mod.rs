/*!
Reduction of conjunctions — the simplifier contract the matcher consumes.

The matcher never simplifies instances itself.
Instead, every update takes a [Reducer], typically closed over the facts of
the proof goal, and passes each candidate instance through it.
The matcher relies on three properties of a reducer `r`:

- **Projection**: `r(r(c)) == r(c)`.
  Generated instances are deduplicated by structural equality, so a reducer
  which keeps simplifying on repeated application would defeat the
  deduplication.
- **Soundness**: `r(c)` is equivalent to `c` in the context the reducer was
  built over.
- **False propagation**: `r(c).is_false()` exactly when `c` is
  unsatisfiable in that context.

The projection law can be checked at every use by enabling
[verify_reduction](crate::config::Config::verify_reduction); the check
doubles the reducer work and so is off by default.

Two reference reducers are provided:

- [IdentityReducer] leaves conjunctions untouched, which satisfies the
  contract over an empty context as construction already collapses trivial
  falsity.
- [GroundReducer] additionally discharges all-existential prefixes whose
  variables are determined by the positive equations, and recognises ground
  predicate contradictions.

[ReduceWithEqs] is the shared workhorse: reduction of a single linear
combination modulo a conjunction of equations, also used by the executor to
solve for instantiation terms when proof logging is active.
*/

use num_traits::Zero;

use crate::structures::conjunction::Conjunction;
use crate::structures::pred_conj::PredConj;
use crate::structures::term::{LinearCombination, TermOrder};

/// A projection-style simplifier over conjunctions.
pub trait Reducer {
    /// The conjunction simplified with respect to the context of the
    /// reducer.
    fn reduce(&self, conj: &Conjunction) -> Conjunction;
}

/// Applies `reducer`, asserting the projection law when `verify` is set.
pub(crate) fn reduce_checked(
    reducer: &dyn Reducer,
    conj: &Conjunction,
    verify: bool,
) -> Conjunction {
    let reduced = reducer.reduce(conj);

    if verify {
        let again = reducer.reduce(&reduced);
        assert_eq!(
            again, reduced,
            "Reducer violates the projection law on {conj}"
        );
    }

    reduced
}

/// Reduction of linear combinations modulo a conjunction of equations.
///
/// Each equation `lc = 0` with a symbolic leading summand rewrites its
/// leading symbol to the strictly smaller remainder of the equation.
/// A combination is reduced by applying such rewrites until none fires; as
/// every step replaces a symbol by smaller symbols the process terminates.
///
/// A rewrite fires only when the leading coefficient of the equation
/// divides the coefficient of the occurrence, so reduction is sound over
/// the integers.
pub struct ReduceWithEqs<'a> {
    eqs: &'a [LinearCombination],
    order: &'a TermOrder,
}

impl<'a> ReduceWithEqs<'a> {
    pub fn new(eqs: &'a [LinearCombination], order: &'a TermOrder) -> Self {
        ReduceWithEqs { eqs, order }
    }

    /// `lc` reduced modulo the equations.
    pub fn reduce(&self, lc: &LinearCombination) -> LinearCombination {
        let mut current = lc.clone();

        'rewriting: loop {
            for eq in self.eqs {
                let Some((eq_coefficient, eq_symbol)) = eq.leading() else {
                    continue;
                };

                let Some(coefficient) = current.coefficient_of(eq_symbol) else {
                    continue;
                };

                if (coefficient % eq_coefficient).is_zero() {
                    let factor = -(coefficient / eq_coefficient);
                    current = current.add(&eq.scale(&factor), self.order);
                    continue 'rewriting;
                }
            }

            break current;
        }
    }
}

/// The reducer which leaves every conjunction untouched.
///
/// Construction of conjunctions already collapses trivial falsity, so the
/// identity satisfies the reducer contract over an empty context.
pub struct IdentityReducer;

impl Reducer for IdentityReducer {
    fn reduce(&self, conj: &Conjunction) -> Conjunction {
        conj.clone()
    }
}

/// A reducer for ground reasoning, optionally closed over a fact base.
///
/// Beyond the normalisation performed at construction, the reducer:
///
/// - Discharges an all-existential prefix when every bound variable is
///   determined as a variable-free term by the positive equations, which in
///   particular collapses fully matched instances to their residue.
/// - Evaluates ground predicate literals against the fact base, when one
///   was supplied: an implied literal is dropped, a denied literal closes
///   the conjunction.
/// - Recognises a ground atom held under both polarities as a
///   contradiction.
pub struct GroundReducer<'a> {
    order: &'a TermOrder,
    facts: Option<&'a PredConj>,
}

impl<'a> GroundReducer<'a> {
    /// A reducer over the empty context.
    pub fn new(order: &'a TermOrder) -> Self {
        GroundReducer { order, facts: None }
    }

    /// A reducer closed over `facts`.
    pub fn over_facts(order: &'a TermOrder, facts: &'a PredConj) -> Self {
        GroundReducer { order, facts: Some(facts) }
    }

    /// The terms the positive equations of `conj` assign to the prefix
    /// variables, innermost first, if every variable is determined
    /// variable-free.
    fn solved_prefix(&self, conj: &Conjunction) -> Option<Vec<LinearCombination>> {
        let solver = ReduceWithEqs::new(conj.arith().pos_eqs(), self.order);

        (0..conj.quans().len() as u32)
            .map(|index| {
                let term = solver.reduce(&LinearCombination::variable(index));
                (!term.contains_variable()).then_some(term)
            })
            .collect()
    }
}

impl Reducer for GroundReducer<'_> {
    fn reduce(&self, conj: &Conjunction) -> Conjunction {
        if conj.is_false() {
            return Conjunction::bottom();
        }

        let mut current = conj.clone();

        if !current.quans().is_empty() && current.quans_all_ex() {
            if let Some(terms) = self.solved_prefix(&current) {
                log::trace!(
                    target: crate::misc::log::targets::REDUCTION,
                    "Prefix of {current} discharged"
                );
                current = current.instantiate(&terms, self.order);
            }
        }

        if let Some(facts) = self.facts {
            let mut kept_pos = Vec::default();
            let mut kept_neg = Vec::default();

            for (atom, negated) in current.preds().literals() {
                if atom.is_ground() {
                    if facts.contains(atom, negated) {
                        continue;
                    }
                    if facts.contains(atom, !negated) {
                        return Conjunction::bottom();
                    }
                }

                match negated {
                    false => kept_pos.push(atom.clone()),
                    true => kept_neg.push(atom.clone()),
                }
            }

            current = Conjunction::new(
                current.quans().to_vec(),
                current.arith().clone(),
                PredConj::from_sorted(kept_pos, kept_neg),
                current.negated().clone(),
                self.order,
            );
        }

        let contradiction = current
            .preds()
            .positive_lits()
            .iter()
            .any(|atom| atom.is_ground() && current.preds().contains(atom, true));
        if contradiction {
            return Conjunction::bottom();
        }

        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::atom::{Atom, Predicate};
    use crate::structures::conjunction::{ArithConj, NegatedConjunctions, Quantifier};
    use crate::structures::pred_conj::PredConj;
    use crate::structures::term::Constant;

    fn setup() -> (Constant, TermOrder) {
        let a = Constant::new("a");
        let order = TermOrder::empty().extend(a.clone());
        (a, order)
    }

    #[test]
    fn equations_solve_variables() {
        let (a, order) = setup();

        // v0 - a = 0
        let eq = LinearCombination::variable(0)
            .sub(&LinearCombination::constant(a.clone()), &order);

        let solver = ReduceWithEqs::new(std::slice::from_ref(&eq), &order);
        assert_eq!(
            solver.reduce(&LinearCombination::variable(0)),
            LinearCombination::constant(a)
        );
    }

    #[test]
    fn determined_prefix_is_discharged() {
        let (a, order) = setup();

        let eq = LinearCombination::variable(0)
            .sub(&LinearCombination::constant(a.clone()), &order);
        let conj = Conjunction::new(
            vec![Quantifier::Ex],
            ArithConj::from_equations(vec![eq], &order),
            PredConj::top(),
            NegatedConjunctions::empty(),
            &order,
        );

        let reduced = GroundReducer::new(&order).reduce(&conj);

        assert!(reduced.is_true());
    }

    #[test]
    fn ground_contradictions_collapse() {
        let (a, order) = setup();
        let p = Predicate::new("p", 1);

        let atom = Atom::new(p, vec![LinearCombination::constant(a)]);
        let conj = Conjunction::new(
            vec![],
            ArithConj::top(),
            PredConj::new(vec![atom.clone()], vec![atom], &order),
            NegatedConjunctions::empty(),
            &order,
        );

        let reduced = GroundReducer::new(&order).reduce(&conj);

        assert!(reduced.is_false());
    }

    #[test]
    fn ground_reduction_is_a_projection() {
        let (a, order) = setup();

        let eq = LinearCombination::variable(0)
            .sub(&LinearCombination::constant(a), &order);
        let conj = Conjunction::new(
            vec![Quantifier::Ex, Quantifier::Ex],
            ArithConj::from_equations(vec![eq], &order),
            PredConj::top(),
            NegatedConjunctions::empty(),
            &order,
        );

        let reducer = GroundReducer::new(&order);
        let once = reducer.reduce(&conj);
        assert_eq!(reducer.reduce(&once), once);
    }
}
