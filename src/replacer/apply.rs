use {
    super::{ReplaceIF, Replacer, Stats},
    crate::{
        assign::{AssignIF, PropagateIF, Removed, VarManipulateIF, VarSelectIF},
        cdb::ClauseDBIF,
        solver::Stamp,
        types::*,
    },
};

#[cfg(not(feature = "platform_wasm"))]
use std::time::Instant;

#[cfg(feature = "platform_wasm")]
use instant::Instant;

impl Replacer {
    pub(super) fn replace_all<A, C>(
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
        debug_assert_eq!(asg.decision_level(), 0);
        debug_assert!(!asg.remains());
        self.run_stats = Stats {
            num_calls: 1,
            ..Stats::default()
        };
        let start = Instant::now();
        let orig_trail = asg.stack_len();

        let mut result = self.rewrite_formula(asg, cdb, assumptions);
        stamp.update_dominators(self);
        if result.is_ok() {
            result = self.settle_assignments(asg, cdb);
        }
        if result.is_ok() {
            self.check_unset_sanity(asg);
        }

        self.run_stats.zero_depth_assigns = asg.stack_len() - orig_trail;
        self.run_stats.elapsed = start.elapsed();
        self.global_stats += self.run_stats.clone();
        log::info!(
            "replaced {} vars{}",
            self.run_stats.actually_replaced_vars,
            if result.is_ok() { "" } else { ", found a contradiction" },
        );
        log::debug!("{}", self.run_stats);
        result
    }
    /// the body of a round; each step runs after the previous one succeeded.
    fn rewrite_formula<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        assumptions: &mut [Lit],
    ) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF + VarSelectIF,
        C: ClauseDBIF,
    {
        self.run_stats.actually_replaced_vars = self.replaced_vars - self.last_replaced_vars;
        self.last_replaced_vars = self.replaced_vars;
        self.settle_assignments(asg, cdb)?;
        self.check_unset_sanity(asg);
        cdb.clean_all(asg);
        debug_assert!(cdb.check_watches());
        if log::log_enabled!(log::Level::Trace) {
            for line in self.report() {
                log::trace!("{line}");
            }
        }

        for vi in 1..self.table.len() {
            self.update_vardata_and_decisionvar(asg, vi, self.table[vi].vi());
        }

        self.replace_implicit(asg, cdb);
        self.flush_delayed(asg, cdb)?;
        self.replace_set(asg, cdb, false)?;
        self.replace_set(asg, cdb, true)?;

        for a in assumptions.iter_mut() {
            asg.var_mut(a.vi()).turn_off(FlagVar::ASSUMED);
            *a = self.resolve(*a);
            asg.var_mut(a.vi()).turn_on(FlagVar::ASSUMED);
        }

        debug_assert!(cdb.check_watches());
        #[cfg(feature = "boundary_check")]
        assert!(cdb.check_watches(), "broken watcher lists after substitution");
        Ok(())
    }
    /// retire `orig` from decision in favor of `rep`.
    fn update_vardata_and_decisionvar<A>(&self, asg: &mut A, orig: VarId, rep: VarId)
    where
        A: VarManipulateIF + VarSelectIF,
    {
        if orig == rep {
            if asg.removed(orig) == Removed::QueuedReplacer {
                asg.set_removed(orig, Removed::None);
            }
            return;
        }
        if matches!(asg.removed(rep), Removed::Eliminated | Removed::Decomposed)
            || asg.removed(orig) == Removed::Replaced
        {
            return;
        }
        asg.set_removed(orig, Removed::Replaced);
        asg.unset_decision_var(orig);
        asg.set_decision_var(rep);
        if self.transfer_activity {
            asg.transfer_activity(orig, rep);
            asg.update_heap(rep);
        }
    }
}
