/*!
Terms, represented as linear combinations of symbols.

A [LinearCombination] is a sum of integer-coefficient summands over
[Symbol]s, together with an integer offset.
Symbols are either free constants or bound variables:

- A [Constant] is an uninterpreted integer-valued symbol, e.g. a Skolem
  constant introduced during proof search.
- A variable is a De Bruijn index into an enclosing quantifier prefix,
  with index 0 bound by the innermost quantifier.

Combinations are kept canonical: summands are strictly descending with
respect to a [TermOrder], no summand has a zero coefficient, and equal
symbols are merged.
As a consequence, two combinations denote the same canonical form exactly
when they are structurally equal, and equality, hashing, and comparison are
all structural.

```rust
# use marten_qi::structures::term::{Constant, LinearCombination, Symbol, TermOrder};
# use num_bigint::BigInt;
let a = Constant::new("a");
let order = TermOrder::empty().extend(a.clone());

// 2·v0 + a + 3, assembled out of sequence.
let lc = LinearCombination::sum(
    vec![
        (BigInt::from(1), Symbol::Constant(a)),
        (BigInt::from(2), Symbol::Variable(0)),
    ],
    BigInt::from(3),
    &order,
);

assert!(lc.is_sorted_by(&order));
assert!(lc.contains_variable());
assert_eq!(lc.to_string(), "2·v0 + a + 3");
```

Coefficients are [BigInt]: the engine never assumes bounded coefficients.
*/

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

mod order;
pub use order::TermOrder;

/// A free, uninterpreted, integer-valued symbol.
///
/// Constants are interned by name: clones share the backing string, and
/// equality and hashing go through the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Constant {
    name: Rc<str>,
}

impl Constant {
    pub fn new(name: &str) -> Self {
        Constant { name: Rc::from(name) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A non-constant symbol which may occur in a linear combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A bound variable, identified by De Bruijn index, 0 innermost.
    Variable(u32),

    /// A free constant.
    Constant(Constant),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Variable(index) => write!(f, "v{index}"),
            Symbol::Constant(constant) => write!(f, "{constant}"),
        }
    }
}

/// A canonical sum of integer-coefficient summands over symbols, plus an
/// integer offset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinearCombination {
    /// Coefficient–symbol summands, strictly descending by symbol, no zero
    /// coefficients.
    summands: Vec<(BigInt, Symbol)>,

    /// The integer offset of the combination.
    offset: BigInt,
}

impl LinearCombination {
    /// The zero combination.
    pub fn zero() -> Self {
        LinearCombination { summands: Vec::default(), offset: BigInt::zero() }
    }

    /// The combination denoting a fixed integer.
    pub fn int(value: impl Into<BigInt>) -> Self {
        LinearCombination { summands: Vec::default(), offset: value.into() }
    }

    /// The combination denoting a single constant.
    pub fn constant(constant: Constant) -> Self {
        LinearCombination {
            summands: vec![(BigInt::one(), Symbol::Constant(constant))],
            offset: BigInt::zero(),
        }
    }

    /// The combination denoting a single bound variable.
    pub fn variable(index: u32) -> Self {
        LinearCombination {
            summands: vec![(BigInt::one(), Symbol::Variable(index))],
            offset: BigInt::zero(),
        }
    }

    /// The canonical combination of the given summands and offset: sorted
    /// descending by `order`, equal symbols merged, zero coefficients
    /// dropped.
    pub fn sum(
        summands: Vec<(BigInt, Symbol)>,
        offset: BigInt,
        order: &TermOrder,
    ) -> Self {
        let mut summands = summands;
        summands.sort_by(|(_, a), (_, b)| order.compare(b, a));

        let mut merged: Vec<(BigInt, Symbol)> = Vec::with_capacity(summands.len());
        for (coefficient, symbol) in summands {
            match merged.last_mut() {
                Some((acc, last)) if *last == symbol => *acc += coefficient,

                _ => merged.push((coefficient, symbol)),
            }
        }
        merged.retain(|(coefficient, _)| !coefficient.is_zero());

        LinearCombination { summands: merged, offset }
    }

    /// The summands of the combination, descending.
    pub fn summands(&self) -> impl Iterator<Item = (&BigInt, &Symbol)> {
        self.summands.iter().map(|(coefficient, symbol)| (coefficient, symbol))
    }

    /// The integer offset of the combination.
    pub fn offset(&self) -> &BigInt {
        &self.offset
    }

    /// The leading (largest) summand, if the combination has any symbol.
    pub fn leading(&self) -> Option<(&BigInt, &Symbol)> {
        self.summands.first().map(|(coefficient, symbol)| (coefficient, symbol))
    }

    /// The coefficient of `symbol`, if `symbol` occurs in the combination.
    pub fn coefficient_of(&self, symbol: &Symbol) -> Option<&BigInt> {
        self.summands
            .iter()
            .find(|(_, candidate)| candidate == symbol)
            .map(|(coefficient, _)| coefficient)
    }

    /// Whether the combination is the integer zero.
    pub fn is_zero(&self) -> bool {
        self.summands.is_empty() && self.offset.is_zero()
    }

    /// Whether the combination is a fixed integer, i.e. has no symbols.
    pub fn is_int(&self) -> bool {
        self.summands.is_empty()
    }

    /// The fixed integer the combination denotes, if it has no symbols.
    pub fn int_value(&self) -> Option<&BigInt> {
        match self.summands.is_empty() {
            true => Some(&self.offset),
            false => None,
        }
    }

    /// Whether any bound variable occurs in the combination.
    pub fn contains_variable(&self) -> bool {
        self.summands
            .iter()
            .any(|(_, symbol)| matches!(symbol, Symbol::Variable(_)))
    }

    /// Whether any constant occurs in the combination.
    pub fn contains_constant(&self) -> bool {
        self.summands
            .iter()
            .any(|(_, symbol)| matches!(symbol, Symbol::Constant(_)))
    }

    /// The combination negated.
    pub fn negate(&self) -> Self {
        LinearCombination {
            summands: self
                .summands
                .iter()
                .map(|(coefficient, symbol)| (-coefficient, symbol.clone()))
                .collect(),
            offset: -&self.offset,
        }
    }

    /// The combination scaled by `factor`.
    pub fn scale(&self, factor: &BigInt) -> Self {
        if factor.is_zero() {
            return LinearCombination::zero();
        }

        LinearCombination {
            summands: self
                .summands
                .iter()
                .map(|(coefficient, symbol)| (coefficient * factor, symbol.clone()))
                .collect(),
            offset: &self.offset * factor,
        }
    }

    /// The sum of two combinations sorted by `order`.
    pub fn add(&self, other: &Self, order: &TermOrder) -> Self {
        debug_assert!(self.is_sorted_by(order) && other.is_sorted_by(order));

        let mut summands = self.summands.clone();
        summands.extend(other.summands.iter().cloned());
        LinearCombination::sum(summands, &self.offset + &other.offset, order)
    }

    /// The difference of two combinations sorted by `order`.
    pub fn sub(&self, other: &Self, order: &TermOrder) -> Self {
        self.add(&other.negate(), order)
    }

    /// The combination with every variable index raised by `shift`, as when
    /// the combination is moved under `shift` additional quantifiers.
    ///
    /// Relative order is preserved, so no re-sort is required.
    pub fn shift_variables(&self, shift: u32) -> Self {
        LinearCombination {
            summands: self
                .summands
                .iter()
                .map(|(coefficient, symbol)| {
                    let shifted = match symbol {
                        Symbol::Variable(index) => Symbol::Variable(index + shift),
                        Symbol::Constant(_) => symbol.clone(),
                    };
                    (coefficient.clone(), shifted)
                })
                .collect(),
            offset: self.offset.clone(),
        }
    }

    /// The combination with variables `depth..depth + terms.len()` replaced
    /// by the respective term of `terms`, shifted under `depth` binders, and
    /// variables above the replaced range shifted down to close the gap.
    ///
    /// `terms[0]` stands for the variable bound by the innermost quantifier
    /// of the eliminated prefix.
    pub fn subst_variables(
        &self,
        terms: &[LinearCombination],
        depth: u32,
        order: &TermOrder,
    ) -> Self {
        let count = terms.len() as u32;
        let mut result = LinearCombination::int(self.offset.clone());

        for (coefficient, symbol) in &self.summands {
            let part = match symbol {
                Symbol::Variable(index) if *index >= depth && *index < depth + count => {
                    terms[(*index - depth) as usize]
                        .shift_variables(depth)
                        .scale(coefficient)
                }

                Symbol::Variable(index) if *index >= depth + count => {
                    LinearCombination {
                        summands: vec![(
                            coefficient.clone(),
                            Symbol::Variable(*index - count),
                        )],
                        offset: BigInt::zero(),
                    }
                }

                _ => LinearCombination {
                    summands: vec![(coefficient.clone(), symbol.clone())],
                    offset: BigInt::zero(),
                },
            };
            result = result.add(&part, order);
        }

        result
    }

    /// Whether the summands of the combination are strictly descending with
    /// respect to `order`.
    pub fn is_sorted_by(&self, order: &TermOrder) -> bool {
        self.summands
            .windows(2)
            .all(|pair| order.compare(&pair[0].1, &pair[1].1) == Ordering::Greater)
    }

    /// The combination re-sorted under `order`.
    pub fn sort_by(&self, order: &TermOrder) -> Self {
        LinearCombination::sum(self.summands.clone(), self.offset.clone(), order)
    }

    /// A total syntactic comparison of combinations sorted by `order`, used
    /// to keep literal lists canonical.
    pub fn compare_to(&self, other: &Self, order: &TermOrder) -> Ordering {
        for (left, right) in self.summands.iter().zip(other.summands.iter()) {
            match order.compare(&left.1, &right.1) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
            match left.0.cmp(&right.0) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }

        match self.summands.len().cmp(&other.summands.len()) {
            Ordering::Equal => self.offset.cmp(&other.offset),
            unequal => unequal,
        }
    }

    /// The combination normalised as the left side of an equation with zero:
    /// scaled by -1 if its leading coefficient (or, for a fixed integer, its
    /// offset) is negative.
    ///
    /// `lc = 0` and `-lc = 0` then share a representation.
    pub fn as_equation_lhs(&self) -> Self {
        let negative = match self.leading() {
            Some((coefficient, _)) => coefficient.is_negative(),
            None => self.offset.is_negative(),
        };

        match negative {
            true => self.negate(),
            false => self.clone(),
        }
    }
}

impl fmt::Display for LinearCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (coefficient, symbol) in &self.summands {
            if first {
                if coefficient.is_one() {
                    write!(f, "{symbol}")?;
                } else if (-coefficient).is_one() {
                    write!(f, "-{symbol}")?;
                } else {
                    write!(f, "{coefficient}·{symbol}")?;
                }
                first = false;
            } else if coefficient.is_negative() {
                if (-coefficient).is_one() {
                    write!(f, " - {symbol}")?;
                } else {
                    write!(f, " - {}·{symbol}", -coefficient)?;
                }
            } else if coefficient.is_one() {
                write!(f, " + {symbol}")?;
            } else {
                write!(f, " + {coefficient}·{symbol}")?;
            }
        }

        if !self.offset.is_zero() {
            if first {
                write!(f, "{}", self.offset)?;
            } else if self.offset.is_negative() {
                write!(f, " - {}", -&self.offset)?;
            } else {
                write!(f, " + {}", self.offset)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Constant, Constant, TermOrder) {
        let a = Constant::new("a");
        let b = Constant::new("b");
        let order = TermOrder::empty().extend(a.clone()).extend(b.clone());
        (a, b, order)
    }

    #[test]
    fn merged_and_dropped_summands() {
        let (a, _, order) = setup();

        let lc = LinearCombination::sum(
            vec![
                (BigInt::from(2), Symbol::Constant(a.clone())),
                (BigInt::from(-2), Symbol::Constant(a)),
                (BigInt::from(1), Symbol::Variable(0)),
            ],
            BigInt::zero(),
            &order,
        );

        assert_eq!(lc, LinearCombination::variable(0));
    }

    #[test]
    fn difference_of_equal_terms_is_zero() {
        let (a, _, order) = setup();

        let lhs = LinearCombination::constant(a.clone());
        let rhs = LinearCombination::constant(a);

        assert!(lhs.sub(&rhs, &order).is_zero());
    }

    #[test]
    fn difference_of_distinct_constants_is_not_an_int() {
        let (a, b, order) = setup();

        let difference =
            LinearCombination::constant(a).sub(&LinearCombination::constant(b), &order);

        assert!(!difference.is_int());
        assert!(!difference.is_zero());
    }

    #[test]
    fn substitution_closes_the_gap() {
        let (a, _, order) = setup();

        // v1 + v0 with v0 := a becomes v0 + a.
        let lc = LinearCombination::sum(
            vec![
                (BigInt::one(), Symbol::Variable(1)),
                (BigInt::one(), Symbol::Variable(0)),
            ],
            BigInt::zero(),
            &order,
        );

        let instantiated =
            lc.subst_variables(&[LinearCombination::constant(a.clone())], 0, &order);

        let expected = LinearCombination::sum(
            vec![
                (BigInt::one(), Symbol::Variable(0)),
                (BigInt::one(), Symbol::Constant(a)),
            ],
            BigInt::zero(),
            &order,
        );
        assert_eq!(instantiated, expected);
    }

    #[test]
    fn shift_preserves_sortedness() {
        let (a, _, order) = setup();

        let lc = LinearCombination::sum(
            vec![
                (BigInt::one(), Symbol::Variable(0)),
                (BigInt::from(3), Symbol::Constant(a)),
            ],
            BigInt::one(),
            &order,
        );

        assert!(lc.shift_variables(4).is_sorted_by(&order));
    }

    #[test]
    fn equation_lhs_fixes_sign() {
        let (a, b, order) = setup();

        let difference =
            LinearCombination::constant(a.clone()).sub(&LinearCombination::constant(b.clone()), &order);
        let reversed =
            LinearCombination::constant(b).sub(&LinearCombination::constant(a), &order);

        assert_eq!(difference.as_equation_lhs(), reversed.as_equation_lhs());
    }
}
