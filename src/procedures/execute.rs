/*!
Execution of match programs.

See [execute_matcher] for the entry point.

# Overview

A program runs against a selection buffer seeded with the start literal in
slot 0.
Selection statements extend the buffer with one candidate fact at a time and
recurse on the remaining statements, so the buffer always mirrors the path
from the program root to the current statement; alias checks prune, and the
terminal statements emit an instance for the selection in the buffer.

Candidates for a selection are drawn from the fact base and then from the
*additional* buffer of the polarity: facts added in the current batch which
have already had their own turn as the start literal.
Feeding the buffers this way lets the new facts of one batch match each
other while considering every pair exactly once, see
[update_facts](crate::matcher::MatcherState::update_facts).

# Instantiation

The equations of a candidate instance are the unification conditions of the
pattern literals against the selected facts, joined with the positive
equations of the clause.
How they are discharged depends on whether inferences are
[logged](crate::reports::InferenceLogger):

- Without logging, the equations replace the positive equations of the
  clause and the rebuilt conjunction is passed through the reducer.
- With logging, the equations are solved for the prefix variables, the
  clause is instantiated with the solved ground terms, and the step is
  reported.
  This requires an all-existential prefix and a fully determined solution,
  which the clause compiler guarantees for the programs it emits.

Either way a falsified candidate is pruned silently, and duplicates within
one execution are collapsed with the first witness kept.
*/

use std::collections::HashSet;

use crate::config::Config;
use crate::matcher::program::{MatchProgram, MatchStatement};
use crate::matcher::AliasChecker;
use crate::misc::log::targets::{self};
use crate::reduce::{reduce_checked, ReduceWithEqs, Reducer};
use crate::reports::InferenceLogger;
use crate::structures::atom::Atom;
use crate::structures::conjunction::{
    normalize_equations, ArithConj, Conjunction, NegatedConjunctions, Quantifier,
};
use crate::structures::pred_conj::PredConj;
use crate::structures::term::{LinearCombination, TermOrder};

/// What a match program runs against.
pub(crate) struct MatchContext<'a> {
    /// The fact base: facts which predate the current batch.
    pub facts: &'a PredConj,

    /// Facts of the current batch whose own matches are complete, positive.
    pub additional_pos: &'a [Atom],

    /// Facts of the current batch whose own matches are complete, negative.
    pub additional_neg: &'a [Atom],

    pub alias: &'a dyn AliasChecker,

    pub reducer: &'a dyn Reducer,

    pub config: &'a Config,

    pub order: &'a TermOrder,
}

/// An insertion-ordered set of instances: duplicates are collapsed and the
/// first witness fixes the position.
#[derive(Default)]
struct InstanceBuffer {
    seen: HashSet<Conjunction>,
    ordered: Vec<Conjunction>,
}

impl InstanceBuffer {
    fn add(&mut self, instance: Conjunction) {
        if self.seen.insert(instance.clone()) {
            self.ordered.push(instance);
        }
    }
}

/// Runs `program` for the fact `start_lit` in slot 0, returning the
/// produced instances in emission order.
pub(crate) fn execute_matcher(
    start_lit: &Atom,
    negated_start: bool,
    program: &MatchProgram,
    ctx: &MatchContext,
    logger: &mut dyn InferenceLogger,
) -> Vec<Conjunction> {
    log::trace!(
        target: targets::EXECUTE,
        "Matching on {}{start_lit}",
        match negated_start {
            true => "¬",
            false => "",
        }
    );

    let mut selected = vec![start_lit.clone()];
    let mut instances = InstanceBuffer::default();

    run(program.statements(), &mut selected, ctx, logger, &mut instances);

    instances.ordered
}

fn run(
    stmts: &[MatchStatement],
    selected: &mut Vec<Atom>,
    ctx: &MatchContext,
    logger: &mut dyn InferenceLogger,
    out: &mut InstanceBuffer,
) {
    let Some((stmt, tail)) = stmts.split_first() else {
        return;
    };

    match stmt {
        MatchStatement::SelectLiteral { pred, negated } => {
            let additional = match negated {
                true => ctx.additional_neg,
                false => ctx.additional_pos,
            };

            let candidates = ctx
                .facts
                .lits_with_pred(pred, *negated)
                .chain(additional.iter().filter(|atom| atom.pred() == pred));

            for atom in candidates {
                selected.push(atom.clone());
                run(tail, selected, ctx, logger, out);
                selected.pop();
            }
        }

        MatchStatement::CheckMayAlias { lit_a, arg_a, lit_b, arg_b } => {
            let may = ctx.alias.may_alias(
                selected[*lit_a].arg(*arg_a),
                selected[*lit_b].arg(*arg_b),
                ctx.order,
            );

            if may {
                run(tail, selected, ctx, logger, out);
            }
        }

        MatchStatement::CheckMayAliasUnary { lit, arg, term } => {
            if ctx.alias.may_alias(selected[*lit].arg(*arg), term, ctx.order) {
                run(tail, selected, ctx, logger, out);
            }
        }

        MatchStatement::InstantiateClause {
            original,
            matched_lits,
            quans,
            arith,
            remaining_lits,
            negated,
        } => {
            debug_assert!(tail.is_empty(), "InstantiateClause must be terminal");

            instantiate(
                original,
                matched_lits,
                quans,
                arith,
                remaining_lits,
                negated,
                selected,
                ctx,
                logger,
                out,
            );
        }

        MatchStatement::UnifyLiterals { lit_a, lit_b } => {
            debug_assert!(tail.is_empty(), "UnifyLiterals must be terminal");

            let Some(eqs) = selected[*lit_a].unify(&selected[*lit_b], ctx.order) else {
                return;
            };

            let conj = Conjunction::from_equations(eqs.clone(), ctx.order);
            let reduced = reduce_checked(ctx.reducer, &conj, ctx.config.verify_reduction);

            match logger.is_logging() {
                true => {
                    // The polarity of slots other than the initial pair is
                    // not recorded, so only those can be reported.
                    debug_assert!(
                        *lit_a == 0 && *lit_b == 1,
                        "Unification outside slots (0, 1) cannot be logged"
                    );

                    if !reduced.is_false() {
                        logger.unify_predicates(&selected[0], &selected[1], &eqs, ctx.order);
                        out.add(reduced);
                    }
                }

                false => out.add(reduced),
            }
        }

        MatchStatement::Choice(options) => {
            debug_assert!(tail.is_empty(), "Choice must be terminal");

            for option in options {
                run(option.statements(), selected, ctx, logger, out);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn instantiate(
    original: &Conjunction,
    matched_lits: &[Atom],
    quans: &[Quantifier],
    arith: &ArithConj,
    remaining_lits: &PredConj,
    negated: &NegatedConjunctions,
    selected: &[Atom],
    ctx: &MatchContext,
    logger: &mut dyn InferenceLogger,
    out: &mut InstanceBuffer,
) {
    debug_assert_eq!(
        matched_lits.len(),
        selected.len(),
        "Selection does not cover the matched literals"
    );

    let mut eqs = arith.pos_eqs().to_vec();
    for (pattern, chosen) in matched_lits.iter().zip(selected.iter()) {
        match pattern.unification_conditions(chosen, ctx.order) {
            Some(conditions) => eqs.extend(conditions),

            None => {
                log::trace!(
                    target: targets::EXECUTE,
                    "Pruned: {pattern} against {chosen}"
                );
                return;
            }
        }
    }

    let Some(eqs) = normalize_equations(eqs, ctx.order) else {
        return;
    };

    match logger.is_logging() {
        true => {
            debug_assert!(
                quans.iter().all(|quan| *quan == Quantifier::Ex),
                "Logged instantiation requires an existential prefix"
            );

            let solver = ReduceWithEqs::new(&eqs, ctx.order);
            let terms = (0..quans.len() as u32)
                .map(|index| solver.reduce(&LinearCombination::variable(index)))
                .collect::<Vec<_>>();
            debug_assert!(
                !terms.iter().any(LinearCombination::contains_variable),
                "Instantiation terms left undetermined variables"
            );

            let instance = original.instantiate(&terms, ctx.order);
            let reduced = reduce_checked(ctx.reducer, &instance, ctx.config.verify_reduction);

            if !reduced.is_false() {
                logger.ground_instantiate_quantifier(
                    original, &terms, &instance, &reduced, ctx.order,
                );
                out.add(reduced);
            }
        }

        false => {
            let arith = arith.update_positive_eqs(eqs, ctx.order);
            let conj = Conjunction::new(
                quans.to_vec(),
                arith,
                remaining_lits.clone(),
                negated.clone(),
                ctx.order,
            );

            out.add(reduce_checked(ctx.reducer, &conj, ctx.config.verify_reduction));
        }
    }
}
