// Module `assign` implements Boolean Constraint Propagation and decision var selection.
// The replacer only works at decision level zero, so this version has no chronological backtrack.

/// Heap for decision var selection
mod heap;
/// Boolean constraint propagation
mod propagate;
/// assignment management
mod stack;
/// Var struct and its removal status
mod var;

pub use self::{
    heap::{VarIdHeap, VarSelectIF},
    propagate::PropagateIF,
    stack::AssignStack,
    var::{Removed, Var, VarManipulateIF},
};

use {
    crate::{cdb::ClauseId, types::*},
    std::fmt,
};

/// API for assignment like [`assigned`](`crate::assign::AssignIF::assigned`), [`decision_level`](`crate::assign::AssignIF::decision_level`) and so on.
pub trait AssignIF {
    /// return the number of vars.
    fn num_vars(&self) -> usize;
    /// return the assignment of var.
    fn assign(&self, vi: VarId) -> Option<bool>;
    /// return *the value* of a literal.
    fn assigned(&self, l: Lit) -> Option<bool>;
    /// return the assign level of var.
    fn level(&self, vi: VarId) -> DecisionLevel;
    /// return the reason of assignment.
    fn reason(&self, vi: VarId) -> AssignReason;
    /// return the current decision level.
    fn decision_level(&self) -> DecisionLevel;
    /// return the i-th element in the stack.
    fn stack(&self, i: usize) -> Lit;
    /// return the length of the trail.
    fn stack_len(&self) -> usize;
    /// return `true` if there are un-propagated assignments.
    fn remains(&self) -> bool;
    /// return the current assignment as a vector indexed by `VarId`.
    fn assign_ref(&self) -> Vec<Option<bool>>;
}

/// Reasons of assignments
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum AssignReason {
    /// Asserted at decision level zero
    Asserted,
    /// Implication by binary clause
    BinaryLink(Lit),
    /// Implication by ternary clause; holding the other literals
    TernaryLink(Lit, Lit),
    /// Assigned by decision
    Decision(DecisionLevel),
    /// Assigned by a long clause.
    Implication(ClauseId),
    /// None of the above.
    None,
}

impl fmt::Display for AssignReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssignReason::Asserted => write!(f, "Asserted"),
            AssignReason::BinaryLink(l) => write!(f, "Implied by a binary clause with {l}"),
            AssignReason::TernaryLink(l0, l1) => {
                write!(f, "Implied by a ternary clause with {l0} and {l1}")
            }
            AssignReason::Decision(lvl) => write!(f, "Decided at level {lvl}"),
            AssignReason::Implication(cid) => write!(f, "Implied by {cid}"),
            AssignReason::None => write!(f, "Not assigned"),
        }
    }
}
