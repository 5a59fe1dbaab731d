/*!
A matcher state method to rebuild under a revised term order.

See [MatcherState::sort_by] for the relevant method.

The proof search extends its term order as fresh constants appear, and
every order-sensitive operation of the matcher assumes its structures are
sorted by the order it is handed.
`sort_by` re-canonicalises facts, clauses, and recorded instances under the
revised order; compiled programs embed terms of the old order and are
discarded.
*/

use crate::matcher::{MatcherState, ProgramCache};
use crate::structures::conjunction::Conjunction;
use crate::structures::term::TermOrder;

impl MatcherState {
    /// The state rebuilt under `order`.
    ///
    /// A state already sorted by `order` is returned as-is.
    pub fn sort_by(&self, order: &TermOrder) -> MatcherState {
        if self.is_sorted_by(order) {
            return self.clone();
        }

        let generated: im::HashSet<Conjunction> = self
            .generated_instances()
            .iter()
            .map(|conj| conj.sort_by(order))
            .collect();

        self.derived(
            self.facts().sort_by(order),
            self.clauses().sort_by(order),
            ProgramCache::default(),
            generated,
        )
    }
}
