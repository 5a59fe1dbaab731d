/*!
A library for incremental instantiation of quantified clauses against ground
predicate facts.

marten_qi implements the quantifier-instantiation engine of a theorem prover
for Presburger arithmetic with uninterpreted predicates: given a growing
base of ground predicate facts and a collection of existentially closed
clauses, it derives every ground instance of a clause whose matched literals
unify with current facts --- without deriving an instance twice, and with
support for retracting facts and clauses as the surrounding proof search
backtracks.

marten_qi is developed to help researchers, developers, or anyone curious,
to investigate matching-based quantifier reasoning, and deliberately leaves
the rest of a prover --- parsing, arithmetic decision procedures, proof
search --- to its caller.

# Orientation

The library is designed around the core structure of a
[matcher state](crate::matcher::MatcherState).

A state is a value holding the facts last seen, the clauses eligible for
matching, and every instance produced so far.
The public methods each return produced instances together with a *new*
state: [update_facts](crate::matcher::MatcherState::update_facts) and
[update_clauses](crate::matcher::MatcherState::update_clauses) grow the
snapshot, [remove](crate::matcher::MatcherState::remove) and
[reduce_clauses](crate::matcher::MatcherState::reduce_clauses) compact it,
and [sort_by](crate::matcher::MatcherState::sort_by) rebuilds it under a
revised term order.
A driver backtracks by resuming from an earlier state; shared substructure
keeps retained states cheap.

Internally, matching is staged as compilation and execution:

- Clauses [compile](crate::matcher::program) to small instruction programs,
  one per predicate and polarity, memoised on the state.
- The [executor](crate::procedures::execute) runs a program whenever a
  fresh fact arrives, selecting compatible facts for the remaining matched
  literals and emitting an instance per complete selection.

Simplification of candidate instances is delegated to an injected
[reducer](crate::reduce::Reducer), an idempotent projection typically
closed over the fact context of the proof goal; likewise the
["may these terms be equal"](crate::matcher::AliasChecker) check used to
prune selections early.

Useful starting points, then, may be:
- The [matcher](crate::matcher) module for the state and its invariants.
- The [procedures](crate::procedures) for the update dynamics.
- The [structures](crate::structures) to familiarise yourself with terms,
  atoms, and conjunctions.
- The [configuration](crate::config) for the polarity oracle and the axiom
  matchers.

# Example

Matching the clause `∃x. p(x) ∧ q(x, a)` against the facts `p(a)` and
`q(a, a)`:

```rust
use marten_qi::{
    config::Config,
    matcher::{check_matchable, DistinctConstants, MatcherState},
    reduce::GroundReducer,
    reports::NullLogger,
    structures::{
        atom::{Atom, Predicate},
        conjunction::{ArithConj, Conjunction, NegatedConjunctions, Quantifier},
        pred_conj::PredConj,
        term::{Constant, LinearCombination, TermOrder},
    },
};

let a = Constant::new("a");
let order = TermOrder::empty().extend(a.clone());

let p = Predicate::new("p", 1);
let q = Predicate::new("q", 2);

// ∃x. p(x) ∧ q(x, a)
let clause = Conjunction::new(
    vec![Quantifier::Ex],
    ArithConj::top(),
    PredConj::new(
        vec![
            Atom::new(p.clone(), vec![LinearCombination::variable(0)]),
            Atom::new(
                q.clone(),
                vec![LinearCombination::variable(0), LinearCombination::constant(a.clone())],
            ),
        ],
        vec![],
        &order,
    ),
    NegatedConjunctions::empty(),
    &order,
);
assert!(check_matchable(&clause, Config::default().positively_matched).is_ok());

let matcher = MatcherState::empty(false);
let reducer = GroundReducer::new(&order);

let (_, matcher) = matcher.update_clauses(
    NegatedConjunctions::new(vec![clause], &order),
    &DistinctConstants,
    &reducer,
    &|_| false,
    &mut NullLogger,
    &order,
);

// p(a), q(a, a)
let facts = PredConj::new(
    vec![
        Atom::new(p, vec![LinearCombination::constant(a.clone())]),
        Atom::new(
            q,
            vec![LinearCombination::constant(a.clone()), LinearCombination::constant(a)],
        ),
    ],
    vec![],
    &order,
);

let (instances, _matcher) = matcher.update_facts(
    facts,
    &DistinctConstants,
    &reducer,
    &|_| false,
    &mut NullLogger,
    &order,
);

// The clause matches in exactly one way, and the instance reduces to truth.
assert_eq!(instances.len(), 1);
assert!(instances[0].is_true());
```

# Logs

To help diagnose issues (somewhat) detailed calls to [log!](log) are made,
and a variety of targets are defined in order to help narrow output to
relevant parts of the library.
The targets are listed in [misc::log].
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::single_match)]
#![allow(mixed_script_confusables)]

pub mod config;
pub mod matcher;
pub mod procedures;
pub mod reduce;
pub mod reports;
pub mod structures;
pub mod types;

pub mod misc;
