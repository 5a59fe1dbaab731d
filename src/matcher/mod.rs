/*!
The matcher --- incremental instantiation of quantified clauses against
ground facts.

The central structure is a [MatcherState]: a snapshot of the facts last
seen, the clauses eligible for matching, and every instance produced so
far.
A state is a value.
Each update returns the produced instances together with a *new* state, and
the caller keeps whichever states its search tree still needs --- on
backtracking, an older state is simply used again.
Shared substructure makes this cheap: in particular the set of produced
instances is a persistent hash set, cloned in constant time.

```rust
# use marten_qi::matcher::{DistinctConstants, MatcherState};
# use marten_qi::reduce::GroundReducer;
# use marten_qi::reports::NullLogger;
# use marten_qi::structures::term::TermOrder;
# use marten_qi::structures::pred_conj::PredConj;
let order = TermOrder::empty();
let matcher = MatcherState::empty(false);

// With no clauses, facts produce no instances.
let (instances, matcher) = matcher.update_facts(
    PredConj::top(),
    &DistinctConstants,
    &GroundReducer::new(&order),
    &|_| false,
    &mut NullLogger,
    &order,
);
assert!(instances.is_empty());
assert!(matcher.clauses().is_empty());
```

Two invariants hold of every state:

- Every clause has an all-existential prefix and at least one literal of a
  matched polarity, see [check_matchable].
- The set of produced instances contains the canonical false conjunction,
  so a falsified candidate is never emitted.

The procedures driving a state live in [procedures](crate::procedures).
*/

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub mod program;
pub use program::{determine_matched_lits, MatchProgram, MatchStatement};

mod alias;
pub use alias::{AliasChecker, DistinctConstants, SymbolicAlias};

use crate::config::{Config, PolarityOracle};
use crate::misc::log::targets::{self};
use crate::structures::atom::Predicate;
use crate::structures::conjunction::{Conjunction, NegatedConjunctions};
use crate::structures::pred_conj::PredConj;
use crate::structures::term::TermOrder;
use crate::types::err::{self};

/// The cache of compiled programs, keyed by predicate and start polarity.
///
/// The cache is shared between states over the same clause collection and
/// discarded whenever the clauses change.
pub(crate) type ProgramCache = Rc<RefCell<HashMap<(Predicate, bool), Rc<MatchProgram>>>>;

/// How a clause behaves under matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseState {
    /// No literal has a matched polarity: the clause is never instantiated.
    Unmatchable,

    /// Instantiation produces a formula which still contains predicate
    /// literals.
    ProducesLits,

    /// Every predicate literal is matched and no sub-conjunction carries
    /// predicates: instantiation produces pure arithmetic.
    Complete,
}

/// How `clause` behaves under matching with the given polarity oracle.
pub fn clause_state(clause: &Conjunction, oracle: PolarityOracle) -> ClauseState {
    let (matched, remaining) = determine_matched_lits(clause.preds(), oracle);

    if matched.is_empty() {
        ClauseState::Unmatchable
    } else if remaining.is_true() && !clause.negated().contains_predicates() {
        ClauseState::Complete
    } else {
        ClauseState::ProducesLits
    }
}

/// Whether `clause` may be given to the matcher: an all-existential prefix
/// and at least one literal of a matched polarity.
pub fn check_matchable(clause: &Conjunction, oracle: PolarityOracle) -> Result<(), err::ClauseError> {
    if !clause.quans_all_ex() {
        return Err(err::ClauseError::UniversalPrefix);
    }

    if clause_state(clause, oracle) == ClauseState::Unmatchable {
        return Err(err::ClauseError::NoMatchedLiteral);
    }

    Ok(())
}

/// The incremental matcher state: facts, clauses, compiled programs, and
/// the instances produced so far.
#[derive(Clone)]
pub struct MatcherState {
    /// Configuration, fixed at creation and shared by derived states.
    config: Config,

    /// The ground facts last seen.
    current_facts: PredConj,

    /// The clauses eligible for matching.
    clauses: NegatedConjunctions,

    /// Compiled programs over `clauses`, built on demand.
    programs: ProgramCache,

    /// Every instance produced by this state or an ancestor.
    ///
    /// Always contains the canonical false conjunction.
    generated: im::HashSet<Conjunction>,
}

impl MatcherState {
    /// An empty matcher, optionally with axiom matchers installed.
    pub fn empty(match_axioms: bool) -> Self {
        MatcherState::from_config(Config {
            match_axioms,
            ..Config::default()
        })
    }

    /// An empty matcher over the given configuration.
    pub fn from_config(config: Config) -> Self {
        MatcherState {
            config,
            current_facts: PredConj::top(),
            clauses: NegatedConjunctions::empty(),
            programs: ProgramCache::default(),
            generated: im::HashSet::unit(Conjunction::bottom()),
        }
    }

    /// A state over the given parts, sharing this state's configuration.
    ///
    /// The instance set of any state must derive from
    /// [from_config](Self::from_config), so the false conjunction is
    /// present.
    pub(crate) fn derived(
        &self,
        current_facts: PredConj,
        clauses: NegatedConjunctions,
        programs: ProgramCache,
        generated: im::HashSet<Conjunction>,
    ) -> Self {
        debug_assert!(
            generated.contains(&Conjunction::bottom()),
            "Instance set without the false conjunction"
        );

        MatcherState {
            config: self.config,
            current_facts,
            clauses,
            programs,
            generated,
        }
    }

    /// A throwaway matcher over the given clauses with no facts and a fresh
    /// program cache, as used to process newly added clauses.
    pub(crate) fn scratch(
        config: Config,
        clauses: NegatedConjunctions,
        generated: im::HashSet<Conjunction>,
    ) -> Self {
        debug_assert!(
            generated.contains(&Conjunction::bottom()),
            "Instance set without the false conjunction"
        );

        MatcherState {
            config,
            current_facts: PredConj::top(),
            clauses,
            programs: ProgramCache::default(),
            generated,
        }
    }

    /// A shared handle on the program cache, for states over the same
    /// clause collection.
    pub(crate) fn program_cache(&self) -> ProgramCache {
        self.programs.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The ground facts last seen.
    pub fn facts(&self) -> &PredConj {
        &self.current_facts
    }

    /// The clauses eligible for matching.
    pub fn clauses(&self) -> &NegatedConjunctions {
        &self.clauses
    }

    /// Every instance produced by this state or an ancestor.
    pub fn generated_instances(&self) -> &im::HashSet<Conjunction> {
        &self.generated
    }

    /// Whether the facts recorded by this state are no longer a subset of
    /// `actual`. A debug helper.
    pub fn facts_are_outdated(&self, actual: &PredConj) -> bool {
        !self.current_facts.subset_of(actual)
    }

    /// Whether facts and clauses are sorted by `order`.
    pub fn is_sorted_by(&self, order: &TermOrder) -> bool {
        self.current_facts.is_sorted_by(order) && self.clauses.is_sorted_by(order)
    }

    /// The compiled program for facts of `pred` with the given polarity,
    /// memoised on the state.
    pub(crate) fn program_for(
        &self,
        pred: &Predicate,
        negated: bool,
        order: &TermOrder,
    ) -> Rc<MatchProgram> {
        let key = (pred.clone(), negated);

        if let Some(program) = self.programs.borrow().get(&key) {
            return program.clone();
        }

        log::trace!(
            target: targets::COMPILE,
            "Program miss for ({pred}, negated: {negated})"
        );
        let program = Rc::new(program::construct_matchers(
            pred,
            negated,
            &self.clauses,
            &self.config,
            order,
        ));
        self.programs.borrow_mut().insert(key, program.clone());
        program
    }
}

impl PartialEq for MatcherState {
    /// States are compared by facts, clauses, and produced instances; the
    /// program cache is derived data.
    fn eq(&self, other: &Self) -> bool {
        self.current_facts == other.current_facts
            && self.clauses == other.clauses
            && self.generated == other.generated
    }
}

impl Eq for MatcherState {}

impl std::fmt::Debug for MatcherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherState")
            .field("current_facts", &self.current_facts)
            .field("clauses", &self.clauses)
            .field("generated", &self.generated.len())
            .finish()
    }
}
