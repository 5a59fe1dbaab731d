/*!
Alias oracles — the overapproximating "may these terms be equal" check.

Before the executor commits to a selection of facts it checks that every
pair of fact arguments standing for the same clause argument may denote the
same value.
The check is supplied by the driver as an [AliasChecker], since whether two
terms may coincide depends on the semantics the driver gives to constants:

- Under [SymbolicAlias], constants are symbolic integers, so `a` and `b`
  may well be equal and only terms at a fixed nonzero integer distance are
  apart.
- Under [DistinctConstants], distinct constants denote distinct values, as
  when every constant was introduced for a provably different position.

Soundness of the matcher requires only that the chosen checker
overapproximates the intended semantics; a precise check merely prunes
earlier.
*/

use num_traits::Zero;

use crate::structures::term::{LinearCombination, TermOrder};

/// An overapproximating alias check between two terms.
pub trait AliasChecker {
    /// Whether `a` and `b` may denote the same value.
    fn may_alias(&self, a: &LinearCombination, b: &LinearCombination, order: &TermOrder) -> bool;
}

/// Constants are symbolic: terms may alias unless they differ by a fixed
/// nonzero integer.
pub struct SymbolicAlias;

impl AliasChecker for SymbolicAlias {
    fn may_alias(&self, a: &LinearCombination, b: &LinearCombination, order: &TermOrder) -> bool {
        let difference = a.sub(b, order);

        match difference.int_value() {
            Some(value) => value.is_zero(),
            None => true,
        }
    }
}

/// Distinct constants denote distinct values: variable-free terms alias
/// only when their difference cancels to zero.
///
/// Terms with variables may always alias.
pub struct DistinctConstants;

impl AliasChecker for DistinctConstants {
    fn may_alias(&self, a: &LinearCombination, b: &LinearCombination, order: &TermOrder) -> bool {
        let difference = a.sub(b, order);

        difference.contains_variable() || difference.is_zero()
    }
}
