/// Var struct and Database management API
use {
    super::{AssignReason, AssignStack},
    crate::types::*,
    std::{
        fmt,
        slice::{Iter, IterMut},
    },
};

/// The reason why a var disappeared from the formula.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Removed {
    /// still alive.
    #[default]
    None,
    /// merged into an equivalence class; waiting for the substitution.
    QueuedReplacer,
    /// substituted by its representative.
    Replaced,
    /// eliminated by variable elimination.
    Eliminated,
    /// moved into a separate component.
    Decomposed,
}

impl Removed {
    /// return `true` if the var can join an equivalence class.
    pub fn is_replaceable(&self) -> bool {
        matches!(self, Removed::None | Removed::QueuedReplacer)
    }
}

impl fmt::Display for Removed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Removed::None => write!(f, "not removed"),
            Removed::QueuedReplacer => write!(f, "queued for replacement"),
            Removed::Replaced => write!(f, "replaced"),
            Removed::Eliminated => write!(f, "eliminated"),
            Removed::Decomposed => write!(f, "decomposed"),
        }
    }
}

/// Object representing a variable.
#[derive(Clone, Debug)]
pub struct Var {
    /// assignment
    pub(crate) assign: Option<bool>,
    /// decision level
    pub(crate) level: DecisionLevel,
    /// assign Reason
    pub(crate) reason: AssignReason,
    /// the `Flag`s (8 bits)
    pub(crate) flags: FlagVar,
    /// a dynamic evaluation criterion like EVSIDS or ACID.
    pub(crate) activity: f64,
    /// removal status
    pub(crate) removed: Removed,
}

impl Default for Var {
    fn default() -> Var {
        Var {
            assign: None,
            level: 0,
            reason: AssignReason::None,
            flags: FlagVar::DECISION,
            activity: 0.0,
            removed: Removed::None,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let st = |flag, mes| if self.is(flag) { mes } else { "" };
        write!(
            f,
            "V{{{:?}, {}{}{}}}",
            self.assign,
            self.removed,
            st(FlagVar::DECISION, ", decision"),
            st(FlagVar::ASSUMED, ", assumed"),
        )
    }
}

impl Var {
    /// return a new vector of $n$ `Var`s.
    pub fn new_vars(n: usize) -> Vec<Var> {
        let mut vec = vec![Var::default(); n + 1];
        vec[0].turn_off(FlagVar::DECISION);
        vec
    }
    pub fn activity(&self) -> f64 {
        self.activity
    }
    pub fn removed(&self) -> Removed {
        self.removed
    }
}

impl FlagIF for Var {
    type FlagType = FlagVar;
    #[inline]
    fn is(&self, flag: Self::FlagType) -> bool {
        self.flags.contains(flag)
    }
    #[inline]
    fn set(&mut self, f: Self::FlagType, b: bool) {
        self.flags.set(f, b);
    }
    #[inline]
    fn turn_off(&mut self, flag: Self::FlagType) {
        self.flags.remove(flag);
    }
    #[inline]
    fn turn_on(&mut self, flag: Self::FlagType) {
        self.flags.insert(flag);
    }
    #[inline]
    fn toggle(&mut self, flag: Self::FlagType) {
        self.flags.toggle(flag);
    }
}

/// Var manipulation
pub trait VarManipulateIF {
    /// return the var.
    fn var(&self, vi: VarId) -> &Var;
    /// return the var.
    fn var_mut(&mut self, vi: VarId) -> &mut Var;
    /// return an iterator over Vars.
    fn var_iter(&self) -> Iter<'_, Var>;
    /// return an mutable iterator over Vars.
    fn var_iter_mut(&mut self) -> IterMut<'_, Var>;
    /// return the removal status of var.
    fn removed(&self, vi: VarId) -> Removed;
    /// set the removal status of var.
    fn set_removed(&mut self, vi: VarId, r: Removed);
}

impl VarManipulateIF for AssignStack {
    #[inline]
    fn var(&self, vi: VarId) -> &Var {
        &self.var[vi]
    }
    #[inline]
    fn var_mut(&mut self, vi: VarId) -> &mut Var {
        &mut self.var[vi]
    }
    fn var_iter(&self) -> Iter<'_, Var> {
        self.var.iter()
    }
    fn var_iter_mut(&mut self) -> IterMut<'_, Var> {
        self.var.iter_mut()
    }
    #[inline]
    fn removed(&self, vi: VarId) -> Removed {
        self.var[vi].removed
    }
    #[inline]
    fn set_removed(&mut self, vi: VarId, r: Removed) {
        self.var[vi].removed = r;
    }
}
