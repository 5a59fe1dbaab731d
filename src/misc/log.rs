/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library
and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [compilation of match programs](crate::matcher::program)
    pub const COMPILE: &str = "compile";

    /// Logs related to [execution of match programs](crate::procedures::execute)
    pub const EXECUTE: &str = "execute";

    /// Logs related to [fact updates](crate::matcher::MatcherState::update_facts)
    pub const FACTS: &str = "facts";

    /// Logs related to [clause updates](crate::matcher::MatcherState::update_clauses) and removal
    pub const CLAUSES: &str = "clauses";

    /// Logs related to [reduction](crate::reduce)
    pub const REDUCTION: &str = "reduction";
}
