/// methods to remove satisfied clauses and falsified literals
mod clean;
/// methods on `ClauseDB`
mod db;
/// methods for UNSAT certification
mod unsat_certificate;
/// methods on `Watch`
mod watch;

pub use self::{
    db::{property, ClauseDB},
    unsat_certificate::{CertificationStore, CertifiedRecord},
    watch::Watch,
};

use {
    crate::{assign::AssignIF, types::*},
    std::{fmt, ops::IndexMut, slice::Iter},
};

/// API for clause management like [`new_clause`](`crate::cdb::ClauseDBIF::new_clause`), [`watcher_list`](`crate::cdb::ClauseDBIF::watcher_list`), and so on.
pub trait ClauseDBIF: IndexMut<ClauseId, Output = Clause> + Instantiate {
    /// return a watcher list of the clauses containing `l`.
    fn watcher_list(&self, l: Lit) -> &[Watch];
    /// return a mutable watcher list.
    fn watcher_list_mut(&mut self, l: Lit) -> &mut Vec<Watch>;
    /// register a binary clause to both watcher lists.
    fn attach_bin(&mut self, l0: Lit, l1: Lit, learnt: bool);
    /// register a ternary clause to all three watcher lists.
    fn attach_tri(&mut self, l0: Lit, l1: Lit, l2: Lit, learnt: bool);
    /// allocate a long clause, attach it and add it to its list.
    /// `lits` should have four or more distinct literals.
    fn new_clause(&mut self, lits: &[Lit], learnt: bool) -> ClauseId;
    /// watch the first two literals of an allocated clause.
    fn attach_clause(&mut self, cid: ClauseId);
    /// remove the watches made from `orig0` and `orig1`, the old first two literals.
    fn detach_modified_clause(&mut self, orig0: Lit, orig1: Lit, cid: ClauseId);
    /// make a clause dead. Watches and the long clause lists are callers' business.
    fn free_clause(&mut self, cid: ClauseId);
    /// return the ids of irredundant (or redundant) long clauses.
    fn long_clauses(&self, learnt: bool) -> &[ClauseId];
    fn long_clauses_mut(&mut self, learnt: bool) -> &mut Vec<ClauseId>;
    /// decrement the implicit clause counters.
    fn discount_implicit(&mut self, bin_irred: usize, bin_red: usize, tri_irred: usize, tri_red: usize);
    /// remove satisfied clauses and falsified literals at decision level zero.
    ///
    /// # CAVEAT
    /// *precondition*: all assignments have been propagated.
    fn clean_all<A>(&mut self, asg: &A)
    where
        A: AssignIF;
    /// return `false` if a watch is dangling or a clause is not watched properly.
    fn check_watches(&self) -> bool;
    /// return all alive clauses; each implicit clause appears once.
    fn collect_clauses(&self) -> Vec<Vec<Lit>>;
    /// return a clause falsified by a (complete) assignment `model`.
    fn validate(&self, model: &[Option<bool>]) -> Option<Vec<Lit>>;
    /// return `true` if the proof sink is open.
    fn is_certificate_active(&self) -> bool;
    /// record a clause to unsat certification.
    fn certificate_add(&mut self, vec: &[Lit]);
    /// record a deleted clause to unsat certification.
    fn certificate_delete(&mut self, vec: &[Lit]);
    /// return the certification records kept on memory.
    fn certificate_records(&self) -> &[(CertifiedRecord, Vec<i32>)];
}

/// Clause identifier, or clause index, starting with one.
/// Note: ids are re-used after the clause is freed.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClauseId {
    /// a sequence number.
    pub ordinal: u32,
}

impl From<usize> for ClauseId {
    #[inline]
    fn from(u: usize) -> ClauseId {
        ClauseId { ordinal: u as u32 }
    }
}

impl From<ClauseId> for usize {
    #[inline]
    fn from(cid: ClauseId) -> usize {
        cid.ordinal as usize
    }
}

impl fmt::Debug for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}C", self.ordinal)
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}C", self.ordinal)
    }
}

/// A representation of 'clause'
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Clause {
    /// The literals in a clause. The first two are watched.
    pub(crate) lits: Vec<Lit>,
    /// Flags
    pub(crate) flags: FlagClause,
}

impl Clause {
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }
    pub fn len(&self) -> usize {
        self.lits.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
    pub fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }
    pub fn contains(&self, lit: Lit) -> bool {
        self.lits.contains(&lit)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let st = |flag, mes| if self.is(flag) { mes } else { "" };
        write!(
            f,
            "{{{:?}{}{}}}",
            i32s(&self.lits),
            st(FlagClause::LEARNT, ", learnt"),
            st(FlagClause::DEAD, ", dead"),
        )
    }
}

impl FlagIF for Clause {
    type FlagType = FlagClause;
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
