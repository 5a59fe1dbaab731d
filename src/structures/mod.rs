/*!
The abstract elements of matching, and their representation.

- [term] --- linear combinations of constants and De Bruijn variables,
  ordered by a [TermOrder](term::TermOrder).
- [atom] --- predicates applied to terms.
- [pred_conj] --- polarised sets of predicate literals: fact bases and the
  literal parts of clauses.
- [conjunction] --- quantified conjunctions: clauses and produced
  instances.

All structures are canonical values: construction normalises, equality and
hashing are structural, and nothing is mutated after construction.
*/

pub mod atom;
pub mod conjunction;
pub mod pred_conj;
pub mod term;
