/*!
A matcher state method to process a revised fact base.

See [MatcherState::update_facts] for the relevant method.

# Overview

The facts of a batch are matched *incrementally*: only the literals absent
from the previous fact base seed program executions, while the literals
shared with it form the fact base those executions select from.

Newly added literals must also match each other, and a naive cross-product
of the additions against themselves would consider every pair twice.
Instead, each added literal is appended to an *additional* buffer of its
polarity only once its own execution is complete, and executions select
from the fact base plus the buffers.
A pair of added literals is then considered exactly once: by the later of
the two, against the earlier one in a buffer.
Positive additions run before negative ones, so the positive buffer is
complete before the first negative execution.

Instances already produced by an ancestor state, and instances the driver
marks irrelevant, are suppressed; everything else extends the instance set
of the returned state.
*/

use crate::matcher::{AliasChecker, MatcherState};
use crate::misc::log::targets::{self};
use crate::procedures::execute::{execute_matcher, MatchContext};
use crate::reduce::Reducer;
use crate::reports::InferenceLogger;
use crate::structures::atom::Atom;
use crate::structures::conjunction::Conjunction;
use crate::structures::pred_conj::PredConj;
use crate::structures::term::TermOrder;

impl MatcherState {
    /// Matches the literals of `new_facts` which are fresh over the
    /// recorded facts, returning the instances produced and the state over
    /// `new_facts`.
    ///
    /// Identical facts are a no-op: the pair `(nothing, self)` is returned.
    ///
    /// Instances for which `is_irrelevant_match` holds are suppressed and
    /// *not* recorded, so they may be produced again by a later call once
    /// relevant.
    pub fn update_facts(
        &self,
        new_facts: PredConj,
        alias: &dyn AliasChecker,
        reducer: &dyn Reducer,
        is_irrelevant_match: &dyn Fn(&Conjunction) -> bool,
        logger: &mut dyn InferenceLogger,
        order: &TermOrder,
    ) -> (Vec<Conjunction>, MatcherState) {
        debug_assert!(
            self.is_sorted_by(order) && new_facts.is_sorted_by(order),
            "update_facts requires sorted facts"
        );

        if new_facts == *self.facts() {
            return (Vec::default(), self.clone());
        }

        let (shared, added) = new_facts.diff(self.facts());
        log::debug!(
            target: targets::FACTS,
            "{} positive / {} negative literal(s) added",
            added.positive_lits().len(),
            added.negative_lits().len()
        );

        let mut additional_pos: Vec<Atom> = Vec::default();
        let mut additional_neg: Vec<Atom> = Vec::default();

        let mut produced = Vec::default();
        let mut generated = self.generated_instances().clone();

        for negated in [false, true] {
            for atom in added.lits(negated) {
                let program = self.program_for(atom.pred(), negated, order);

                let ctx = MatchContext {
                    facts: &shared,
                    additional_pos: &additional_pos,
                    additional_neg: &additional_neg,
                    alias,
                    reducer,
                    config: self.config(),
                    order,
                };

                for instance in execute_matcher(atom, negated, &program, &ctx, logger) {
                    if !generated.contains(&instance) && !is_irrelevant_match(&instance) {
                        log::trace!(target: targets::FACTS, "Produced {instance}");
                        generated.insert(instance.clone());
                        produced.push(instance);
                    }
                }

                // Only now may later additions select this atom.
                match negated {
                    false => additional_pos.push(atom.clone()),
                    true => additional_neg.push(atom.clone()),
                }
            }
        }

        let state = self.derived(
            new_facts,
            self.clauses().clone(),
            self.program_cache(),
            generated,
        );

        (produced, state)
    }
}
