/*!
Error types used in the library.

Under documented use no error crosses the public boundary: the matcher state
guards its preconditions with debug assertions, and in release builds a
violated precondition is the caller's problem.
The types here exist so a driver can check candidate material *before*
handing it to the matcher --- see
[check_matchable](crate::matcher::check_matchable) --- and so invariant
violations carry a name rather than a bare message.
*/

use std::fmt;

/// A union of varied error kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error in a clause offered to the matcher.
    Clause(ClauseError),

    /// An error in the structure of a match program.
    Program(ProgramError),
}

/// Errors in a clause offered to the matcher.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseError {
    /// A universal quantifier in the prefix of the clause.
    ///
    /// The matcher instantiates existentially closed negated conjunctions
    /// only; a universal prefix cannot be discharged by ground terms.
    UniversalPrefix,

    /// No literal of the clause has the matched polarity of its predicate.
    ///
    /// Such a clause would never be selected by any match program.
    NoMatchedLiteral,
}

impl From<ClauseError> for ErrorKind {
    fn from(e: ClauseError) -> Self {
        ErrorKind::Clause(e)
    }
}

impl fmt::Display for ClauseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniversalPrefix => write!(f, "universal quantifier in the clause prefix"),
            Self::NoMatchedLiteral => write!(f, "no literal of a matched polarity"),
        }
    }
}

/// Errors in the structure of a match program.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgramError {
    /// A choice statement before the end of a program.
    ///
    /// Choice is the sole recursive statement and must terminate the
    /// program which contains it.
    MisplacedChoice,
}

impl From<ProgramError> for ErrorKind {
    fn from(e: ProgramError) -> Self {
        ErrorKind::Program(e)
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MisplacedChoice => write!(f, "choice statement before the end of a program"),
        }
    }
}
