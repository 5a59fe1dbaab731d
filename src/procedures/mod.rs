/*!
Procedures over a matcher state.

Each module holds one method of
[MatcherState](crate::matcher::MatcherState), together with its
documentation:

- [execute] --- the interpreter for compiled match programs, shared by the
  update procedures.
- [update_facts] --- incremental matching of a revised fact base.
- [update_clauses] --- matching of clauses new to the collection.
- [remove] --- discarding formulas whose symbols leave scope.
- [reduce_clauses] --- re-simplification under a changed context.
- [sort] --- rebuilding under a revised term order.

Every procedure returns a fresh state and leaves the receiver untouched;
a driver backtracks by resuming from an earlier state.
*/

pub(crate) mod execute;

pub mod reduce_clauses;
pub mod remove;
pub mod sort;
pub mod update_clauses;
pub mod update_facts;

pub use remove::{RemovalPredicate, RemoveSymbols};
