/*!
A matcher state method to re-simplify clauses under a changed context.

See [MatcherState::reduce_clauses] for the relevant method.

As the proof context narrows --- a constant becomes fixed, facts accumulate
--- a clause held by the matcher may admit simplification by the context
reducer.
Clauses which mention no constant and no ground atom are skipped: nothing
the context binds occurs in them, so reduction cannot change them.

A clause the reducer *does* change leaves the matcher and is returned, for
the driver to process like any other produced formula (typically it is
re-added in reduced form).
The instance set is reduced alongside, so deduplication operates modulo the
revised context.
*/

use crate::matcher::{MatcherState, ProgramCache};
use crate::misc::log::targets::{self};
use crate::reduce::{reduce_checked, Reducer};
use crate::structures::conjunction::{Conjunction, NegatedConjunctions};
use crate::structures::term::TermOrder;

impl MatcherState {
    /// Passes every clause and every recorded instance through `reducer`,
    /// returning the clauses the reducer changed and the state over the
    /// kept clauses.
    ///
    /// When nothing changes the pair `(nothing, self)` is returned.
    pub fn reduce_clauses(
        &self,
        reducer: &dyn Reducer,
        order: &TermOrder,
    ) -> (Vec<Conjunction>, MatcherState) {
        debug_assert!(self.is_sorted_by(order), "reduce_clauses requires sorted structures");

        let reduce_if_necessary = |conj: &Conjunction| {
            // Without constants and ground atoms there is nothing a context
            // reducer could bind.
            match conj.contains_constant() || conj.contains_ground_atom() {
                true => reduce_checked(reducer, conj, self.config().verify_reduction),
                false => conj.clone(),
            }
        };

        let reduced = NegatedConjunctions::new(
            self.clauses().iter().map(reduce_if_necessary).collect(),
            order,
        );
        let (kept_clauses, reductions) = reduced.diff(self.clauses());

        let generated: im::HashSet<Conjunction> = self
            .generated_instances()
            .iter()
            .map(reduce_if_necessary)
            .collect();

        if reductions.is_empty() && generated == *self.generated_instances() {
            return (Vec::default(), self.clone());
        }

        log::debug!(
            target: targets::REDUCTION,
            "{} clause(s) changed under reduction",
            reductions.len()
        );

        let programs = match reductions.is_empty() {
            true => self.program_cache(),
            false => ProgramCache::default(),
        };

        let state = self.derived(self.facts().clone(), kept_clauses, programs, generated);

        (reductions.iter().cloned().collect(), state)
    }
}
