/*!
Match programs --- compiled instructions for finding the instances of a
clause.

For each pair of a predicate and a start polarity the clauses of a matcher
compile to one [MatchProgram]: a small instruction list which, run by the
[executor](crate::procedures::execute) with a newly arrived fact in slot 0,
enumerates every way of completing the fact to a full selection of matched
literals, and emits an instance per completion.

# Compilation

For a clause and a designated start literal, the program is laid out as:

1. Alias checks anchoring the arguments of the start literal: repeated
   arguments must pair with themselves, and variable-free arguments must
   pair with the selected fact.
2. Per further matched literal, a [SelectLiteral](MatchStatement::SelectLiteral)
   followed by alias checks against every earlier occurrence of each
   argument.
3. A terminal [InstantiateClause](MatchStatement::InstantiateClause)
   carrying everything needed to assemble the instance.

The per-predicate *axiom matcher* is the two-slot program pairing a fact
with every other fact of the predicate and polarity and emitting their
unification equations, terminated by
[UnifyLiterals](MatchStatement::UnifyLiterals).

All programs for a `(predicate, polarity)` pair are combined under a single
trailing [Choice](MatchStatement::Choice).
Choice is the sole recursive statement and must terminate the program
holding it, an invariant checked at construction.
*/

use std::collections::HashMap;

use crate::config::{Config, PolarityOracle};
use crate::misc::log::targets::{self};
use crate::structures::atom::{Atom, Predicate};
use crate::structures::conjunction::{ArithConj, Conjunction, NegatedConjunctions, Quantifier};
use crate::structures::pred_conj::PredConj;
use crate::structures::term::{LinearCombination, TermOrder};
use crate::types::err::{self};

/// An instruction of a match program.
#[derive(Clone, Debug)]
pub enum MatchStatement {
    /// Bind the next slot to each atom of the predicate and polarity drawn
    /// from the fact base and the additional buffers, in turn.
    SelectLiteral {
        pred: Predicate,
        negated: bool,
    },

    /// Require that an argument of one selected atom may alias an argument
    /// of another.
    CheckMayAlias {
        lit_a: usize,
        arg_a: usize,
        lit_b: usize,
        arg_b: usize,
    },

    /// Require that an argument of a selected atom may alias a fixed term.
    CheckMayAliasUnary {
        lit: usize,
        arg: usize,
        term: LinearCombination,
    },

    /// Terminal: emit an instance of the clause for the current selection.
    InstantiateClause {
        /// The clause the program was compiled from.
        original: Conjunction,

        /// The matched literals, start literal first, in slot order.
        matched_lits: Vec<Atom>,

        /// The quantifier prefix of the clause.
        quans: Vec<Quantifier>,

        /// The arithmetic literals of the clause.
        arith: ArithConj,

        /// The literals of the clause the matcher does not select for.
        remaining_lits: PredConj,

        /// The negated sub-conjunctions of the clause.
        negated: NegatedConjunctions,
    },

    /// Terminal: unify the two selected literals of a shared predicate.
    UnifyLiterals {
        lit_a: usize,
        lit_b: usize,
    },

    /// Run each option in sequence. Always the last statement.
    Choice(Vec<MatchProgram>),
}

/// A compiled match program.
///
/// Construction checks the choice placement invariant, recursively.
#[derive(Clone, Debug, Default)]
pub struct MatchProgram {
    stmts: Vec<MatchStatement>,
}

impl MatchProgram {
    /// A program of the given statements, if choice statements terminate
    /// every (sub)program they occur in.
    pub fn checked(stmts: Vec<MatchStatement>) -> Result<Self, err::ProgramError> {
        fn choice_placement_ok(stmts: &[MatchStatement]) -> bool {
            for (index, stmt) in stmts.iter().enumerate() {
                if let MatchStatement::Choice(options) = stmt {
                    if index + 1 != stmts.len() {
                        return false;
                    }
                    if !options
                        .iter()
                        .all(|option| choice_placement_ok(&option.stmts))
                    {
                        return false;
                    }
                }
            }
            true
        }

        match choice_placement_ok(&stmts) {
            true => Ok(MatchProgram { stmts }),
            false => Err(err::ProgramError::MisplacedChoice),
        }
    }

    /// The program offering each of `options` in turn.
    ///
    /// With no options the program is a no-op.
    pub fn choice(options: Vec<MatchProgram>) -> Self {
        MatchProgram {
            stmts: vec![MatchStatement::Choice(options)],
        }
    }

    pub fn statements(&self) -> &[MatchStatement] {
        &self.stmts
    }
}

/// Splits the literals of a clause into the matched literals, each with its
/// polarity, and the remaining literals.
///
/// A literal is matched when its polarity agrees with the oracle for its
/// predicate: positive literals of positively matched predicates and
/// negative literals of negatively matched ones.
pub fn determine_matched_lits(
    preds: &PredConj,
    oracle: PolarityOracle,
) -> (Vec<(Atom, bool)>, PredConj) {
    let mut matched = Vec::default();
    let mut remaining_pos = Vec::default();
    let mut remaining_neg = Vec::default();

    for (atom, negated) in preds.literals() {
        match negated == !oracle(atom.pred()) {
            true => matched.push((atom.clone(), negated)),

            false => match negated {
                false => remaining_pos.push(atom.clone()),
                true => remaining_neg.push(atom.clone()),
            },
        }
    }

    // The filtered lists inherit sortedness and distinctness.
    (matched, PredConj::from_sorted(remaining_pos, remaining_neg))
}

/// The program finding the instances of `clause` whose slot 0 is a fact
/// matching `start_lit`.
fn clause_matcher(
    start_lit: &Atom,
    neg_start: bool,
    clause: &Conjunction,
    oracle: PolarityOracle,
    _order: &TermOrder,
) -> MatchProgram {
    let (matched, remaining) = determine_matched_lits(clause.preds(), oracle);
    debug_assert!(
        matched
            .iter()
            .any(|(atom, negated)| atom == start_lit && *negated == neg_start),
        "Start literal {start_lit} is not matched in {clause}"
    );

    let mut stmts = Vec::default();
    let mut pattern = vec![start_lit.clone()];

    // Occurrences of each argument term seen so far, as (slot, argument).
    let mut known: HashMap<LinearCombination, Vec<(usize, usize)>> = HashMap::default();

    let mut check_args = |stmts: &mut Vec<MatchStatement>, lit: &Atom, slot: usize| {
        for (arg_index, arg) in lit.args().iter().enumerate() {
            let occurrences = known.entry(arg.clone()).or_default();

            for (other_slot, other_arg) in occurrences.iter() {
                stmts.push(MatchStatement::CheckMayAlias {
                    lit_a: *other_slot,
                    arg_a: *other_arg,
                    lit_b: slot,
                    arg_b: arg_index,
                });
            }

            if !arg.contains_variable() {
                stmts.push(MatchStatement::CheckMayAliasUnary {
                    lit: slot,
                    arg: arg_index,
                    term: arg.clone(),
                });
            }

            occurrences.push((slot, arg_index));
        }
    };

    check_args(&mut stmts, start_lit, 0);

    let mut start_taken = false;
    for (lit, negated) in &matched {
        if !start_taken && lit == start_lit && *negated == neg_start {
            start_taken = true;
            continue;
        }

        stmts.push(MatchStatement::SelectLiteral {
            pred: lit.pred().clone(),
            negated: *negated,
        });
        check_args(&mut stmts, lit, pattern.len());
        pattern.push(lit.clone());
    }

    stmts.push(MatchStatement::InstantiateClause {
        original: clause.clone(),
        matched_lits: pattern,
        quans: clause.quans().to_vec(),
        arith: clause.arith().clone(),
        remaining_lits: remaining,
        negated: clause.negated().clone(),
    });

    match MatchProgram::checked(stmts) {
        Ok(program) => program,

        Err(e) => panic!("! Compiled an invalid clause matcher: {e}"),
    }
}

/// The two-slot program pairing a fact of `pred` with every other fact of
/// the predicate and polarity, and emitting their unification equations.
fn axiom_matcher(pred: &Predicate, neg_start: bool) -> MatchProgram {
    let mut stmts = vec![MatchStatement::SelectLiteral {
        pred: pred.clone(),
        negated: neg_start,
    }];

    for index in 0..pred.arity() {
        stmts.push(MatchStatement::CheckMayAlias {
            lit_a: 0,
            arg_a: index,
            lit_b: 1,
            arg_b: index,
        });
    }

    stmts.push(MatchStatement::UnifyLiterals { lit_a: 0, lit_b: 1 });

    match MatchProgram::checked(stmts) {
        Ok(program) => program,

        Err(e) => panic!("! Compiled an invalid axiom matcher: {e}"),
    }
}

/// The combined program for facts of `pred` with the polarity given by
/// `neg_start`: a clause matcher per start literal of the predicate, plus
/// the axiom matcher when configured, under a single trailing choice.
pub(crate) fn construct_matchers(
    pred: &Predicate,
    neg_start: bool,
    clauses: &NegatedConjunctions,
    config: &Config,
    order: &TermOrder,
) -> MatchProgram {
    let mut options = Vec::default();

    // Facts of the polarity the oracle does not match never start a clause
    // matcher, though the axiom matcher still applies.
    if neg_start != (config.positively_matched)(pred) {
        for clause in clauses.iter() {
            for start_lit in clause.preds().lits_with_pred(pred, neg_start) {
                options.push(clause_matcher(
                    start_lit,
                    neg_start,
                    clause,
                    config.positively_matched,
                    order,
                ));
            }
        }
    }

    if config.match_axioms {
        options.push(axiom_matcher(pred, neg_start));
    }

    log::debug!(
        target: targets::COMPILE,
        "Compiled {} option(s) for ({pred}, negated: {neg_start})",
        options.len()
    );

    MatchProgram::choice(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::Constant;

    // ∃x. p(x) ∧ q(x, a), with its symbols.
    fn example() -> (Predicate, Predicate, NegatedConjunctions, TermOrder) {
        let a = Constant::new("a");
        let order = TermOrder::empty().extend(a.clone());
        let p = Predicate::new("p", 1);
        let q = Predicate::new("q", 2);

        let clause = Conjunction::new(
            vec![Quantifier::Ex],
            ArithConj::top(),
            PredConj::new(
                vec![
                    Atom::new(p.clone(), vec![LinearCombination::variable(0)]),
                    Atom::new(
                        q.clone(),
                        vec![
                            LinearCombination::variable(0),
                            LinearCombination::constant(a),
                        ],
                    ),
                ],
                vec![],
                &order,
            ),
            NegatedConjunctions::empty(),
            &order,
        );

        (p, q, NegatedConjunctions::new(vec![clause], &order), order)
    }

    #[test]
    fn clause_program_shape() {
        let (p, _, clauses, order) = example();

        let program = construct_matchers(&p, false, &clauses, &Config::default(), &order);

        let stmts = program.statements();
        assert_eq!(stmts.len(), 1);
        let MatchStatement::Choice(options) = &stmts[0] else {
            panic!("Top statement is not a choice");
        };
        assert_eq!(options.len(), 1);

        // Starting on p(x): select q, anchor the shared x and the fixed a,
        // instantiate.
        let inner = options[0].statements();
        assert!(matches!(
            inner[0],
            MatchStatement::SelectLiteral { ref pred, negated: false } if pred.name() == "q"
        ));
        assert!(matches!(
            inner[1],
            MatchStatement::CheckMayAlias { lit_a: 0, arg_a: 0, lit_b: 1, arg_b: 0 }
        ));
        assert!(matches!(
            inner[2],
            MatchStatement::CheckMayAliasUnary { lit: 1, arg: 1, .. }
        ));
        assert!(matches!(inner[3], MatchStatement::InstantiateClause { .. }));
        assert_eq!(inner.len(), 4);
    }

    #[test]
    fn start_literal_is_anchored_first() {
        let (_, q, clauses, order) = example();

        let program = construct_matchers(&q, false, &clauses, &Config::default(), &order);

        let MatchStatement::Choice(options) = &program.statements()[0] else {
            panic!("Top statement is not a choice");
        };

        // Starting on q(x, a): the fixed argument is checked before any
        // selection.
        let inner = options[0].statements();
        assert!(matches!(
            inner[0],
            MatchStatement::CheckMayAliasUnary { lit: 0, arg: 1, .. }
        ));
        assert!(matches!(
            inner[1],
            MatchStatement::SelectLiteral { ref pred, negated: false } if pred.name() == "p"
        ));
    }

    #[test]
    fn unmatched_polarity_compiles_no_options() {
        let (p, _, clauses, order) = example();

        let program = construct_matchers(&p, true, &clauses, &Config::default(), &order);

        let MatchStatement::Choice(options) = &program.statements()[0] else {
            panic!("Top statement is not a choice");
        };
        assert!(options.is_empty());
    }

    #[test]
    fn axiom_program_shape() {
        let order = TermOrder::empty();
        let p = Predicate::new("p", 2);
        let config = Config {
            match_axioms: true,
            ..Config::default()
        };

        let program =
            construct_matchers(&p, false, &NegatedConjunctions::empty(), &config, &order);

        let MatchStatement::Choice(options) = &program.statements()[0] else {
            panic!("Top statement is not a choice");
        };
        assert_eq!(options.len(), 1);

        let axiom = options[0].statements();
        assert!(matches!(
            axiom[0],
            MatchStatement::SelectLiteral { ref pred, negated: false } if *pred == p
        ));
        assert!(matches!(
            axiom[1],
            MatchStatement::CheckMayAlias { lit_a: 0, arg_a: 0, lit_b: 1, arg_b: 0 }
        ));
        assert!(matches!(
            axiom[2],
            MatchStatement::CheckMayAlias { lit_a: 0, arg_a: 1, lit_b: 1, arg_b: 1 }
        ));
        assert!(matches!(
            axiom[3],
            MatchStatement::UnifyLiterals { lit_a: 0, lit_b: 1 }
        ));
    }

    #[test]
    fn misplaced_choice_is_rejected() {
        let p = Predicate::new("p", 1);

        let stmts = vec![
            MatchStatement::Choice(Vec::default()),
            MatchStatement::SelectLiteral { pred: p, negated: false },
        ];

        assert_eq!(
            MatchProgram::checked(stmts).unwrap_err(),
            err::ProgramError::MisplacedChoice
        );
    }

    #[test]
    fn negative_literals_remain_under_a_positive_oracle() {
        let a = Constant::new("a");
        let order = TermOrder::empty().extend(a.clone());
        let p = Predicate::new("p", 1);
        let r = Predicate::new("r", 1);

        let preds = PredConj::new(
            vec![Atom::new(p, vec![LinearCombination::variable(0)])],
            vec![Atom::new(r, vec![LinearCombination::constant(a)])],
            &order,
        );

        let (matched, remaining) =
            determine_matched_lits(&preds, crate::config::always_positive);

        assert_eq!(matched.len(), 1);
        assert!(!matched[0].1);
        assert_eq!(remaining.negative_lits().len(), 1);
    }
}
