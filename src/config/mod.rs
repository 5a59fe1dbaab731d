/*!
Configuration of a matcher.

All configuration is fixed when a [MatcherState](crate::matcher::MatcherState)
is created and carried, unchanged, through every derived state.

# Example

```rust
# use marten_qi::config::Config;
# use marten_qi::matcher::MatcherState;
let mut config = Config::default();
config.match_axioms = true;

let matcher = MatcherState::from_config(config);
assert!(matcher.clauses().is_empty());
```
*/

use crate::structures::atom::Predicate;

/// The polarity the matcher targets for a predicate: true when literals of
/// the predicate are matched positively.
///
/// The oracle partitions the literals of every clause into matched literals,
/// which select facts, and remaining literals, which are carried into the
/// produced instance.
pub type PolarityOracle = fn(&Predicate) -> bool;

/// The oracle matching every predicate positively.
pub fn always_positive(_: &Predicate) -> bool {
    true
}

/// The primary configuration structure.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Whether an axiom matcher is installed per predicate, pairing each
    /// new fact with every other fact of the predicate and emitting their
    /// unification equations.
    pub match_axioms: bool,

    /// The polarity targeted by the matcher, per predicate.
    pub positively_matched: PolarityOracle,

    /// Whether each reducer application is followed by a second application
    /// asserting the projection law.
    ///
    /// The check doubles the reducer work on every candidate instance.
    pub verify_reduction: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            match_axioms: false,
            positively_matched: always_positive,
            verify_reduction: false,
        }
    }
}
