/*!
A matcher state method to process a revised clause collection.

See [MatcherState::update_clauses] for the relevant method.

Clauses new to the collection must be matched against the *whole* recorded
fact base, not only against future additions.
This is arranged by a throwaway matcher holding just the added clauses over
an empty fact base: running its
[update_facts](MatcherState::update_facts) with the recorded facts treats
every fact as fresh, so exactly the instances of the added clauses arise.
The throwaway matcher shares the instance set, so instances an ancestor
already produced stay suppressed, and its additions carry over to the
returned state.

Axiom matchers are disabled on the throwaway matcher: pairs of facts do not
change with the clause collection, so their unifications were already
produced when the facts arrived.

The program cache of the prior state is discarded: programs are compiled
from the closed clause collection, which has changed.
*/

use crate::config::Config;
use crate::matcher::{check_matchable, AliasChecker, MatcherState, ProgramCache};
use crate::misc::log::targets::{self};
use crate::reduce::Reducer;
use crate::reports::InferenceLogger;
use crate::structures::conjunction::{Conjunction, NegatedConjunctions};
use crate::structures::term::TermOrder;

impl MatcherState {
    /// Matches the clauses of `new_clauses` which are fresh over the
    /// recorded clauses against the recorded facts, returning the instances
    /// produced and the state over `new_clauses`.
    ///
    /// An identical collection is a no-op: the pair `(nothing, self)` is
    /// returned.
    pub fn update_clauses(
        &self,
        new_clauses: NegatedConjunctions,
        alias: &dyn AliasChecker,
        reducer: &dyn Reducer,
        is_irrelevant_match: &dyn Fn(&Conjunction) -> bool,
        logger: &mut dyn InferenceLogger,
        order: &TermOrder,
    ) -> (Vec<Conjunction>, MatcherState) {
        debug_assert!(
            self.is_sorted_by(order) && new_clauses.is_sorted_by(order),
            "update_clauses requires sorted structures"
        );
        debug_assert!(
            new_clauses
                .iter()
                .all(|clause| check_matchable(clause, self.config().positively_matched).is_ok()),
            "Unmatchable clause offered to the matcher"
        );

        if new_clauses == *self.clauses() {
            return (Vec::default(), self.clone());
        }

        let (_, added) = new_clauses.diff(self.clauses());
        log::debug!(target: targets::CLAUSES, "{} clause(s) added", added.len());

        let scratch = MatcherState::scratch(
            Config {
                match_axioms: false,
                ..*self.config()
            },
            added,
            self.generated_instances().clone(),
        );

        let (instances, scratch) = scratch.update_facts(
            self.facts().clone(),
            alias,
            reducer,
            is_irrelevant_match,
            logger,
            order,
        );

        let state = self.derived(
            self.facts().clone(),
            new_clauses,
            ProgramCache::default(),
            scratch.generated_instances().clone(),
        );

        (instances, state)
    }
}
