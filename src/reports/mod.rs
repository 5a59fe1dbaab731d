/*!
Inference logging.

When a proof of the original problem is wanted, the matcher reports each
inference it performs to an [InferenceLogger]: a ground instantiation of a
quantified clause, or a unification of two literals of the same predicate.
A transcriber can replay the reports into whatever certificate format the
surrounding prover emits.

Logging changes how the executor instantiates: with an active logger the
concrete instantiation terms are solved for, so the logged step carries
them, while without one the executor only rewrites equations.
With a reducer closed over the fact base the two routes produce the same
reduced instances.

[NullLogger] discards every report and is the default collaborator;
[RecordingLogger] accumulates reports for inspection.
*/

use crate::structures::atom::Atom;
use crate::structures::conjunction::Conjunction;
use crate::structures::term::{LinearCombination, TermOrder};

/// A sink for the inferences performed by the matcher.
pub trait InferenceLogger {
    /// Whether inferences are recorded.
    ///
    /// When false, the matcher is free to skip the work of assembling
    /// inference details.
    fn is_logging(&self) -> bool {
        false
    }

    /// A clause was instantiated with the given ground terms, innermost
    /// quantifier first, producing `instance`, kept in reduced form
    /// `result`.
    fn ground_instantiate_quantifier(
        &mut self,
        clause: &Conjunction,
        terms: &[LinearCombination],
        instance: &Conjunction,
        result: &Conjunction,
        order: &TermOrder,
    ) {
        let _ = (clause, terms, instance, result, order);
    }

    /// Two literals of the same predicate were unified under the equations
    /// `eqs`.
    fn unify_predicates(
        &mut self,
        left: &Atom,
        right: &Atom,
        eqs: &[LinearCombination],
        order: &TermOrder,
    ) {
        let _ = (left, right, eqs, order);
    }
}

/// The logger which discards every inference.
pub struct NullLogger;

impl InferenceLogger for NullLogger {}

/// A recorded inference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inference {
    /// A ground instantiation of a quantified clause.
    GroundInstantiation {
        clause: Conjunction,
        terms: Vec<LinearCombination>,
        result: Conjunction,
    },

    /// A unification of two literals of the same predicate.
    PredicateUnification {
        left: Atom,
        right: Atom,
        eqs: Vec<LinearCombination>,
    },
}

/// The logger which accumulates every inference, e.g. for a transcriber or
/// a test.
#[derive(Default)]
pub struct RecordingLogger {
    /// The recorded inferences, in emission order.
    pub inferences: Vec<Inference>,
}

impl InferenceLogger for RecordingLogger {
    fn is_logging(&self) -> bool {
        true
    }

    fn ground_instantiate_quantifier(
        &mut self,
        clause: &Conjunction,
        terms: &[LinearCombination],
        _instance: &Conjunction,
        result: &Conjunction,
        _order: &TermOrder,
    ) {
        self.inferences.push(Inference::GroundInstantiation {
            clause: clause.clone(),
            terms: terms.to_vec(),
            result: result.clone(),
        });
    }

    fn unify_predicates(
        &mut self,
        left: &Atom,
        right: &Atom,
        eqs: &[LinearCombination],
        _order: &TermOrder,
    ) {
        self.inferences.push(Inference::PredicateUnification {
            left: left.clone(),
            right: right.clone(),
            eqs: eqs.to_vec(),
        });
    }
}
