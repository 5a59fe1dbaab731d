use marten_qi::{
    config::{always_positive, Config},
    matcher::{check_matchable, clause_state, ClauseState, DistinctConstants, MatcherState},
    procedures::{RemovalPredicate, RemoveSymbols},
    reduce::{GroundReducer, IdentityReducer, Reducer},
    reports::NullLogger,
    structures::{
        atom::{Atom, Predicate},
        conjunction::{ArithConj, Conjunction, NegatedConjunctions, Quantifier},
        pred_conj::PredConj,
        term::{Constant, LinearCombination, TermOrder},
    },
    types::err::ClauseError,
};

fn symbols() -> (Constant, Constant, TermOrder, Predicate, Predicate) {
    let a = Constant::new("a");
    let b = Constant::new("b");
    let order = TermOrder::empty().extend(a.clone()).extend(b.clone());
    (a, b, order, Predicate::new("p", 1), Predicate::new("q", 2))
}

// ∃x. p(x) ∧ q(x, a)
fn clause_p_q(p: &Predicate, q: &Predicate, a: &Constant, order: &TermOrder) -> Conjunction {
    Conjunction::new(
        vec![Quantifier::Ex],
        ArithConj::top(),
        PredConj::new(
            vec![
                Atom::new(p.clone(), vec![LinearCombination::variable(0)]),
                Atom::new(
                    q.clone(),
                    vec![
                        LinearCombination::variable(0),
                        LinearCombination::constant(a.clone()),
                    ],
                ),
            ],
            vec![],
            order,
        ),
        NegatedConjunctions::empty(),
        order,
    )
}

fn p_fact(p: &Predicate, c: &Constant) -> Atom {
    Atom::new(p.clone(), vec![LinearCombination::constant(c.clone())])
}

fn q_fact(q: &Predicate, c: &Constant, d: &Constant) -> Atom {
    Atom::new(
        q.clone(),
        vec![
            LinearCombination::constant(c.clone()),
            LinearCombination::constant(d.clone()),
        ],
    )
}

/// Removal of everything, as when a proof branch is abandoned wholesale.
struct RemoveAll;

impl RemovalPredicate for RemoveAll {
    fn remove_atom(&self, _: &Atom) -> bool {
        true
    }

    fn remove_clause(&self, _: &Conjunction) -> bool {
        true
    }
}

mod updates {
    use super::*;

    #[test]
    fn added_clauses_match_recorded_facts() {
        let (a, _, order, p, q) = symbols();

        // Facts first, the clause after: the clause update must run the
        // match.
        let facts = PredConj::new(
            vec![p_fact(&p, &a), q_fact(&q, &a, &a)],
            vec![],
            &order,
        );
        let (_, matcher) = MatcherState::empty(false).update_facts(
            facts,
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        let (instances, matcher) = matcher.update_clauses(
            NegatedConjunctions::new(vec![clause_p_q(&p, &q, &a, &order)], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        assert_eq!(instances.len(), 1);
        assert!(instances[0].is_true());
        assert_eq!(matcher.clauses().len(), 1);
    }

    #[test]
    fn identical_clauses_are_a_fixed_point() {
        let (a, _, order, p, q) = symbols();

        let clauses = NegatedConjunctions::new(vec![clause_p_q(&p, &q, &a, &order)], &order);
        let (_, matcher) = MatcherState::empty(false).update_clauses(
            clauses.clone(),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        let (instances, unchanged) = matcher.update_clauses(
            clauses,
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        assert!(instances.is_empty());
        assert_eq!(unchanged, matcher);
    }
}

mod removal {
    use super::*;

    #[test]
    fn removed_clauses_are_returned_and_stay_deduplicated() {
        let (a, _, order, p, q) = symbols();
        let clause = clause_p_q(&p, &q, &a, &order);

        let (_, matcher) = MatcherState::empty(false).update_clauses(
            NegatedConjunctions::new(vec![clause.clone()], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        let facts = PredConj::new(
            vec![p_fact(&p, &a), q_fact(&q, &a, &a)],
            vec![],
            &order,
        );
        let (instances, matcher) = matcher.update_facts(
            facts.clone(),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );
        assert_eq!(instances.len(), 1);

        // The predicate p leaves scope, taking the clause and its facts.
        let (removed, matcher) = matcher.remove(&RemoveSymbols::new([p.clone()]));
        assert_eq!(removed, vec![clause.clone()]);
        assert!(matcher.clauses().is_empty());
        assert!(matcher.facts().negative_lits().is_empty());
        assert!(!matcher.facts().contains(&p_fact(&p, &a), false));

        // Re-reporting the facts is inert without the clause.
        let (instances, matcher) = matcher.update_facts(
            facts,
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );
        assert!(instances.is_empty());

        // Restoring the clause does not re-derive the recorded instance.
        let (instances, _) = matcher.update_clauses(
            NegatedConjunctions::new(vec![clause], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );
        assert!(instances.is_empty());
    }

    #[test]
    fn fact_only_removal_keeps_the_clauses() {
        let (a, _, order, p, q) = symbols();
        let r = Predicate::new("r", 1);

        let (_, matcher) = MatcherState::empty(false).update_clauses(
            NegatedConjunctions::new(vec![clause_p_q(&p, &q, &a, &order)], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );
        let (_, matcher) = matcher.update_facts(
            PredConj::new(vec![Atom::new(r.clone(), vec![LinearCombination::constant(a)])], vec![], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        let (removed, matcher) = matcher.remove(&RemoveSymbols::new([r]));

        assert!(removed.is_empty());
        assert_eq!(matcher.clauses().len(), 1);
        assert!(matcher.facts().is_true());
    }

    #[test]
    fn removing_nothing_is_a_fixed_point() {
        let (a, _, order, p, q) = symbols();

        let (_, matcher) = MatcherState::empty(false).update_clauses(
            NegatedConjunctions::new(vec![clause_p_q(&p, &q, &a, &order)], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        let (removed, unchanged) = matcher.remove(&RemoveSymbols::new([Predicate::new("r", 1)]));

        assert!(removed.is_empty());
        assert_eq!(unchanged, matcher);
    }

    #[test]
    fn removal_then_restoration_only_grows_the_instance_set() {
        let (a, _, order, p, q) = symbols();
        let clause = clause_p_q(&p, &q, &a, &order);
        let clauses = NegatedConjunctions::new(vec![clause], &order);

        let (_, matcher) = MatcherState::empty(false).update_clauses(
            clauses.clone(),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );
        let (_, matcher) = matcher.update_facts(
            PredConj::new(vec![p_fact(&p, &a), q_fact(&q, &a, &a)], vec![], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );
        let recorded = matcher.generated_instances().clone();

        let (_, matcher) = matcher.remove(&RemoveAll);
        let (_, matcher) = matcher.update_clauses(
            clauses,
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        assert!(recorded
            .iter()
            .all(|instance| matcher.generated_instances().contains(instance)));
    }
}

mod reduction {
    use super::*;

    /// Collapses every conjunction, to make any reduction visible.
    struct Collapse;

    impl Reducer for Collapse {
        fn reduce(&self, _: &Conjunction) -> Conjunction {
            Conjunction::top()
        }
    }

    #[test]
    fn variable_only_clauses_skip_reduction() {
        let (_, _, order, p, q) = symbols();

        // ∃x. p(x) ∧ q(x, x): no constant, no ground atom.
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
                            LinearCombination::variable(0),
                        ],
                    ),
                ],
                vec![],
                &order,
            ),
            NegatedConjunctions::empty(),
            &order,
        );

        let (_, matcher) = MatcherState::empty(false).update_clauses(
            NegatedConjunctions::new(vec![clause], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        let (reductions, unchanged) = matcher.reduce_clauses(&Collapse, &order);

        assert!(reductions.is_empty());
        assert_eq!(unchanged, matcher);
    }

    #[test]
    fn changed_clauses_leave_the_matcher() {
        let (a, _, order, p, q) = symbols();

        let (_, matcher) = MatcherState::empty(false).update_clauses(
            NegatedConjunctions::new(vec![clause_p_q(&p, &q, &a, &order)], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        // The clause mentions the constant a, so Collapse reaches it.
        let (reductions, matcher) = matcher.reduce_clauses(&Collapse, &order);

        assert_eq!(reductions.len(), 1);
        assert!(reductions[0].is_true());
        assert!(matcher.clauses().is_empty());
    }

    #[test]
    fn recorded_instances_are_reduced_alongside() {
        let (a, _, order, p, q) = symbols();

        let (_, matcher) = MatcherState::empty(false).update_clauses(
            NegatedConjunctions::new(vec![clause_p_q(&p, &q, &a, &order)], &order),
            &DistinctConstants,
            &GroundReducer::new(&order),
            &|_| false,
            &mut NullLogger,
            &order,
        );

        // Under the identity reducer the instance keeps its equations.
        let (instances, matcher) = matcher.update_facts(
            PredConj::new(vec![p_fact(&p, &a), q_fact(&q, &a, &a)], vec![], &order),
            &DistinctConstants,
            &IdentityReducer,
            &|_| false,
            &mut NullLogger,
            &order,
        );
        assert_eq!(instances.len(), 1);
        let raw_instance = instances[0].clone();
        assert!(!raw_instance.is_true());

        let (_, matcher) = matcher.reduce_clauses(&GroundReducer::new(&order), &order);

        assert!(!matcher.generated_instances().contains(&raw_instance));
        assert!(matcher.generated_instances().contains(&Conjunction::top()));
        assert!(matcher.generated_instances().contains(&Conjunction::bottom()));
    }
}

mod classification {
    use super::*;

    #[test]
    fn clause_states() {
        let (a, _, order, p, q) = symbols();

        let complete = clause_p_q(&p, &q, &a, &order);
        assert_eq!(clause_state(&complete, always_positive), ClauseState::Complete);

        // ∃x. p(x) ∧ ¬q(x, a): the negative literal is residue.
        let residual = Conjunction::new(
            vec![Quantifier::Ex],
            ArithConj::top(),
            PredConj::new(
                vec![Atom::new(p.clone(), vec![LinearCombination::variable(0)])],
                vec![Atom::new(
                    q.clone(),
                    vec![
                        LinearCombination::variable(0),
                        LinearCombination::constant(a.clone()),
                    ],
                )],
                &order,
            ),
            NegatedConjunctions::empty(),
            &order,
        );
        assert_eq!(clause_state(&residual, always_positive), ClauseState::ProducesLits);

        // ∃x. ¬p(x): nothing to select on.
        let unmatchable = Conjunction::new(
            vec![Quantifier::Ex],
            ArithConj::top(),
            PredConj::new(
                vec![],
                vec![Atom::new(p, vec![LinearCombination::variable(0)])],
                &order,
            ),
            NegatedConjunctions::empty(),
            &order,
        );
        assert_eq!(clause_state(&unmatchable, always_positive), ClauseState::Unmatchable);
        assert_eq!(
            check_matchable(&unmatchable, always_positive),
            Err(ClauseError::NoMatchedLiteral)
        );
    }

    #[test]
    fn universal_prefixes_are_rejected() {
        let (a, _, order, p, q) = symbols();

        let clause = clause_p_q(&p, &q, &a, &order);
        let universal = Conjunction::new(
            vec![Quantifier::All],
            clause.arith().clone(),
            clause.preds().clone(),
            clause.negated().clone(),
            &order,
        );

        assert_eq!(
            check_matchable(&universal, Config::default().positively_matched),
            Err(ClauseError::UniversalPrefix)
        );
    }
}
