//! Module `types' provides various building blocks, including
//! some common traits.

/// methods on CNF description
pub mod cnf;
/// methods on flags used in Var and Clause
pub mod flags;
/// methods on literals
pub mod lit;

pub use self::{cnf::*, flags::*, lit::*};

pub use crate::{assign::AssignReason, config::Config, solver::SolverEvent};

use std::fmt;

/// Decision level
pub type DecisionLevel = u32;

#[cfg(feature = "deterministic")]
/// A `HashMap` whose iteration order doesn't change between runs.
pub type HashMap<K, V> =
    std::collections::HashMap<K, V, std::hash::BuildHasherDefault<ahash::AHasher>>;

#[cfg(not(feature = "deterministic"))]
pub type HashMap<K, V> = std::collections::HashMap<K, V>;

/// API for object instantiation based on `Configuration` and `CNFDescription`.
/// This is implemented by *all the modules* except `Configuration` and `CNFDescription`.
///
/// # Example
///
/// ```
/// use splr_replacer::{config::Config, types::*};
/// use splr_replacer::{cdb::ClauseDB, replacer::Replacer, solver::Solver};
/// let _ = ClauseDB::instantiate(&Config::default(), &CNFDescription::default());
/// let _ = Replacer::instantiate(&Config::default(), &CNFDescription::default());
/// let _ = Solver::instantiate(&Config::default(), &CNFDescription::default());
///```
pub trait Instantiate {
    /// make and return an object from `Config` and `CNFDescription`.
    fn instantiate(conf: &Config, cnf: &CNFDescription) -> Self;
    /// update by a solver event.
    fn handle(&mut self, _e: SolverEvent) {}
}

/// API for reading a statistic counter by key.
pub trait PropertyDereference<I, O: Sized> {
    fn derefer(&self, key: I) -> O;
}

/// API for O(n) deletion from a list, providing `delete_unstable`.
pub trait Delete<T> {
    /// *O(n)* item deletion protocol.
    fn delete_unstable<F>(&mut self, filter: F)
    where
        F: FnMut(&T) -> bool;
}

impl<T> Delete<T> for Vec<T> {
    fn delete_unstable<F>(&mut self, filter: F)
    where
        F: FnMut(&T) -> bool,
    {
        if let Some(i) = self.iter().position(filter) {
            self.swap_remove(i);
        }
    }
}

/// Capture a conflict
pub type ConflictContext = (Lit, AssignReason);

/// Return type of unit propagation
pub type PropagationResult = Result<(), ConflictContext>;

/// Errors raised while building or rewriting a formula.
/// Once one of them is returned, the formula is known to be unsatisfiable
/// except for `OutOfRange`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolverError {
    /// a given clause is empty, or shrinks to the empty clause.
    EmptyClause,
    /// a contradiction was found at decision level zero.
    Inconsistent,
    /// a literal refers to a var which doesn't exist. '0' is an example.
    OutOfRange,
    /// unit propagation failed at decision level zero.
    RootLevelConflict(ConflictContext),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for SolverError {}

/// A Return type used by solver functions.
pub type MaybeInconsistent = Result<(), SolverError>;
