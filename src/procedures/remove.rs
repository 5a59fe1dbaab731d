/*!
A matcher state method to discard formulas, e.g. when a predicate leaves
scope.

See [MatcherState::remove] for the relevant method.

Removal is driven by a [RemovalPredicate] so the caller decides what
"mentions" means for its setting; [RemoveSymbols] covers the common case of
predicate symbols going out of scope.

The removed clauses are returned to the caller --- a driver typically
re-adds them, possibly rewritten, when the search returns to a branch where
their symbols are live.
Removed facts are dropped silently: facts are re-reported with the next
fact base anyway.
The instance set is kept, so a removed-then-restored clause does not
produce its old instances again.
*/

use std::collections::HashSet;

use crate::matcher::{MatcherState, ProgramCache};
use crate::misc::log::targets::{self};
use crate::structures::atom::{Atom, Predicate};
use crate::structures::conjunction::Conjunction;

/// Selects the formulas a [remove](MatcherState::remove) call discards.
pub trait RemovalPredicate {
    /// Whether the fact `atom` is to be removed.
    fn remove_atom(&self, atom: &Atom) -> bool;

    /// Whether the clause `clause` is to be removed.
    fn remove_clause(&self, clause: &Conjunction) -> bool;
}

/// Removal of every formula mentioning one of a set of predicate symbols.
pub struct RemoveSymbols {
    preds: HashSet<Predicate>,
}

impl RemoveSymbols {
    pub fn new(preds: impl IntoIterator<Item = Predicate>) -> Self {
        RemoveSymbols { preds: preds.into_iter().collect() }
    }
}

impl RemovalPredicate for RemoveSymbols {
    fn remove_atom(&self, atom: &Atom) -> bool {
        self.preds.contains(atom.pred())
    }

    fn remove_clause(&self, clause: &Conjunction) -> bool {
        clause.has_predicate_satisfying(&|pred| self.preds.contains(pred))
    }
}

impl MatcherState {
    /// Discards the facts and clauses selected by `remove_pred`, returning
    /// the removed clauses and the reduced state.
    ///
    /// When no clause is affected the program cache survives; otherwise it
    /// is discarded with the clauses it was compiled from.
    pub fn remove(&self, remove_pred: &dyn RemovalPredicate) -> (Vec<Conjunction>, MatcherState) {
        let (removed_clauses, kept_clauses) = self
            .clauses()
            .partition(|clause| remove_pred.remove_clause(clause));
        let (removed_facts, kept_facts) =
            self.facts().partition(|atom| remove_pred.remove_atom(atom));

        if removed_clauses.is_empty() {
            if removed_facts.is_true() {
                return (Vec::default(), self.clone());
            }

            log::debug!(target: targets::FACTS, "Removal dropped facts only");
            let state = self.derived(
                kept_facts,
                self.clauses().clone(),
                self.program_cache(),
                self.generated_instances().clone(),
            );

            (Vec::default(), state)
        } else {
            log::debug!(
                target: targets::CLAUSES,
                "Removal dropped {} clause(s)",
                removed_clauses.len()
            );
            let state = self.derived(
                kept_facts,
                kept_clauses,
                ProgramCache::default(),
                self.generated_instances().clone(),
            );

            (removed_clauses.iter().cloned().collect(), state)
        }
    }
}
