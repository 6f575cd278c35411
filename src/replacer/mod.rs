//! Module `replacer` implements equivalent literal substitution.
//!
//! * a substitution table, flattened to depth one, maps each var to its representative literal
//! * `merge` builds equivalence classes and detects contradictions at decision level zero
//! * `perform_replace` rewrites every clause, watcher list and assumption with the table
//!
//!# Example
//!
//!```
//!  use splr_replacer::{replacer::ReplaceIF, solver::{SatSolverIF, Solver, SubstituteIF}, types::*};
//!  let cnf: Vec<Vec<i32>> = vec![vec![1, 2, 3], vec![-1, -3]];
//!  let mut s = Solver::try_from((Config::default(), cnf.as_slice())).expect("consistent");
//!  s.merge(Lit::from(1i32), Lit::from(2i32), true, false).expect("consistent");
//!  s.apply_all().expect("consistent");
//!  assert_eq!(s.rpl.resolve(Lit::from(1i32)).vi(), s.rpl.resolve(Lit::from(2i32)).vi());
//!  assert_eq!(s.rpl.representatives().len(), 1);
//!```

/// the driver of a substitution round
mod apply;
/// deferred enqueues and binary clauses, assignment settling
mod bridge;
/// rewriting binary and ternary clauses held in watcher lists
mod implicit;
/// replacing literals in long clauses
mod long;
/// adding clauses through the substitution table
mod materialize;
/// building equivalence classes
mod merge;
/// assignment consistency between vars and their representatives
mod sanity;
/// run and global statistics
mod stats;

pub use self::stats::Stats;

use {
    crate::{
        assign::{AssignIF, PropagateIF, VarManipulateIF, VarSelectIF},
        cdb::ClauseDBIF,
        solver::Stamp,
        types::*,
    },
    std::fmt,
};

/// API for equivalent literal substitution like [`merge`](`crate::replacer::ReplaceIF::merge`), [`perform_replace`](`crate::replacer::ReplaceIF::perform_replace`), [`resolve`](`crate::replacer::ReplaceIF::resolve`) and so on.
pub trait ReplaceIF {
    /// return the representative literal of `l` with composed polarity.
    fn resolve(&self, l: Lit) -> Lit;
    /// return the representative var of `vi`.
    fn representative_of(&self, vi: VarId) -> VarId;
    /// return `true` if the var of `l` points to another var.
    fn is_replaced(&self, l: Lit) -> bool;
    /// return the vars which have at least one dependent, in ascending order.
    fn representatives(&self) -> Vec<VarId>;
    /// return the dependents of representative `vi`.
    fn dependents(&self, vi: VarId) -> &[VarId];
    /// return the number of vars merged into another so far.
    fn num_replaced_vars(&self) -> usize;
    /// return `Ok(true)` if the table already knows `vi == lit`.
    ///
    /// # Errors
    ///
    /// `SolverError::Inconsistent` if the table knows `vi == !lit`.
    fn already_in(&self, vi: VarId, lit: Lit) -> Result<bool, SolverError>;
    /// assert `lit1 == lit2` (or `lit1 == !lit2` if `equal` is `false`).
    /// If `add_later` holds, the equivalence is kept to be added as two binary clauses
    /// by [`materialize_deferred`](`crate::replacer::ReplaceIF::materialize_deferred`).
    ///
    /// # Errors
    ///
    /// if the solver becomes inconsistent.
    fn merge<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        lit1: Lit,
        lit2: Lit,
        equal: bool,
        add_later: bool,
    ) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF,
        C: ClauseDBIF;
    /// rewrite the whole formula with the substitution table.
    ///
    /// # Errors
    ///
    /// if the solver becomes inconsistent.
    fn perform_replace<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        assumptions: &mut [Lit],
        stamp: &mut Stamp,
    ) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF + VarSelectIF,
        C: ClauseDBIF;
    /// add a clause at decision level zero, replacing already replaced vars.
    ///
    /// # Errors
    ///
    /// if the solver becomes inconsistent.
    fn add_clause_int<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        lits: &[Lit],
        learnt: bool,
    ) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF,
        C: ClauseDBIF;
    /// add the kept equivalences as pairs of binary clauses.
    ///
    /// # Errors
    ///
    /// if the solver becomes inconsistent.
    fn materialize_deferred<A, C>(&mut self, asg: &mut A, cdb: &mut C) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF,
        C: ClauseDBIF;
    /// renumber vars; `outer_to_inter[old] == new` and `inter_to_outer[new] == old`.
    fn update_vars(&mut self, outer_to_inter: &[VarId], inter_to_outer: &[VarId]);
    /// fill the values of replaced vars from their representatives.
    fn extend_model(&self, model: &mut [Option<bool>]);
    /// return "var `v` is replaced by `lit`" lines.
    fn report(&self) -> Vec<String>;
    /// return an estimation of the heap memory in bytes.
    fn bytes_mem_used(&self) -> usize;
}

/// Equivalent literal substitution engine
#[derive(Clone, Debug)]
pub struct Replacer {
    /// the representative literal of each var; `Lit::positive(vi)` if not replaced
    table: Vec<Lit>,
    /// representative var -> vars pointing to it
    reverse_table: HashMap<VarId, Vec<VarId>>,
    /// literals to be asserted after the watcher list scan
    delayed_enqueue: Vec<Lit>,
    /// binary clauses to be attached after the watcher list scan
    delayed_attach_bin: Vec<(Lit, Lit, bool)>,
    /// equivalences to be added as two binary clauses
    later_add_bin_xor: Vec<(Lit, Lit)>,
    /// the number of merged vars
    replaced_vars: usize,
    /// `replaced_vars` at the end of the last round
    last_replaced_vars: usize,
    transfer_activity: bool,
    /// statistics of the last round
    pub run_stats: Stats,
    /// accumulated statistics
    pub global_stats: Stats,
}

impl Default for Replacer {
    fn default() -> Replacer {
        Replacer {
            table: vec![Lit::positive(0)],
            reverse_table: HashMap::default(),
            delayed_enqueue: Vec::new(),
            delayed_attach_bin: Vec::new(),
            later_add_bin_xor: Vec::new(),
            replaced_vars: 0,
            last_replaced_vars: 0,
            transfer_activity: true,
            run_stats: Stats::default(),
            global_stats: Stats::default(),
        }
    }
}

impl Instantiate for Replacer {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> Replacer {
        Replacer {
            table: (0..=cnf.num_of_variables).map(Lit::positive).collect(),
            transfer_activity: config.rpl_transfer_activity,
            ..Replacer::default()
        }
    }
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::NewVar => {
                let vi = self.table.len();
                self.table.push(Lit::positive(vi));
            }
        }
    }
}

impl fmt::Display for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RPL:: vars: {}, replaced: {}, trees: {}, deferred equivalences: {}",
            self.table.len() - 1,
            self.replaced_vars,
            self.reverse_table.len(),
            self.later_add_bin_xor.len(),
        )
    }
}

impl ReplaceIF for Replacer {
    #[inline]
    fn resolve(&self, l: Lit) -> Lit {
        self.table[l.vi()].negate_if(!bool::from(l))
    }
    #[inline]
    fn representative_of(&self, vi: VarId) -> VarId {
        self.table[vi].vi()
    }
    #[inline]
    fn is_replaced(&self, l: Lit) -> bool {
        self.table[l.vi()].vi() != l.vi()
    }
    fn representatives(&self) -> Vec<VarId> {
        let mut vec = self.reverse_table.keys().copied().collect::<Vec<_>>();
        vec.sort_unstable();
        vec
    }
    fn dependents(&self, vi: VarId) -> &[VarId] {
        self.reverse_table.get(&vi).map_or(&[], |v| v.as_slice())
    }
    fn num_replaced_vars(&self) -> usize {
        self.replaced_vars
    }
    fn already_in(&self, vi: VarId, lit: Lit) -> Result<bool, SolverError> {
        // siblings under a third representative are caught as well
        let l1 = self.resolve(Lit::positive(vi));
        let l2 = self.resolve(lit);
        if l1.vi() != l2.vi() {
            return Ok(false);
        }
        if l1 != l2 {
            return Err(SolverError::Inconsistent);
        }
        Ok(true)
    }
    fn merge<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        lit1: Lit,
        lit2: Lit,
        equal: bool,
        add_later: bool,
    ) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF,
        C: ClauseDBIF,
    {
        self.merge_lits(asg, cdb, lit1, lit2, equal, add_later)
    }
    fn perform_replace<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        assumptions: &mut [Lit],
        stamp: &mut Stamp,
    ) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF + VarSelectIF,
        C: ClauseDBIF,
    {
        self.replace_all(asg, cdb, assumptions, stamp)
    }
    fn add_clause_int<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        lits: &[Lit],
        learnt: bool,
    ) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF,
        C: ClauseDBIF,
    {
        self.add_clause_through_table(asg, cdb, lits, learnt)
    }
    fn materialize_deferred<A, C>(&mut self, asg: &mut A, cdb: &mut C) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF,
        C: ClauseDBIF,
    {
        for (l1, l2) in std::mem::take(&mut self.later_add_bin_xor) {
            self.add_clause_through_table(asg, cdb, &[l1, l2], false)?;
            self.add_clause_through_table(asg, cdb, &[!l1, !l2], false)?;
        }
        Ok(())
    }
    fn update_vars(&mut self, outer_to_inter: &[VarId], inter_to_outer: &[VarId]) {
        debug_assert!(self.later_add_bin_xor.is_empty());
        debug_assert_eq!(outer_to_inter.len(), self.table.len());
        let renumber = |l: Lit| Lit::from((outer_to_inter[l.vi()], bool::from(l)));
        self.table = inter_to_outer
            .iter()
            .map(|outer| renumber(self.table[*outer]))
            .collect::<Vec<_>>();
        self.reverse_table = std::mem::take(&mut self.reverse_table)
            .into_iter()
            .map(|(rep, deps)| {
                (
                    outer_to_inter[rep],
                    deps.into_iter().map(|vi| outer_to_inter[vi]).collect(),
                )
            })
            .collect();
    }
    fn extend_model(&self, model: &mut [Option<bool>]) {
        for (vi, l) in self.table.iter().enumerate().skip(1) {
            if l.vi() != vi {
                let positive = bool::from(*l);
                model[vi] = model[l.vi()].map(|b| b == positive);
            }
        }
    }
    fn report(&self) -> Vec<String> {
        self.table
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(vi, l)| l.vi() != *vi)
            .map(|(vi, l)| format!("var {vi} is replaced by {l}"))
            .collect()
    }
    fn bytes_mem_used(&self) -> usize {
        use std::mem::size_of;
        let mut b = 0;
        b += self.delayed_enqueue.capacity() * size_of::<Lit>();
        b += self.delayed_attach_bin.capacity() * size_of::<(Lit, Lit, bool)>();
        b += self.later_add_bin_xor.capacity() * size_of::<(Lit, Lit)>();
        b += self.table.capacity() * size_of::<Lit>();
        for deps in self.reverse_table.values() {
            b += deps.capacity() * size_of::<VarId>();
        }
        b += self.reverse_table.capacity() * (size_of::<VarId>() + size_of::<Vec<VarId>>());
        b
    }
}
