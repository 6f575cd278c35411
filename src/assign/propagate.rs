/// implement boolean constraint propagation, backjump
use {
    super::{AssignIF, AssignReason, AssignStack},
    crate::{
        cdb::{ClauseDBIF, Watch},
        types::*,
    },
};

/// API for Boolean Constraint Propagation like [`propagate`](`crate::assign::PropagateIF::propagate`), [`assign_by_decision`](`crate::assign::PropagateIF::assign_by_decision`), [`cancel_until`](`crate::assign::PropagateIF::cancel_until`), and so on.
pub trait PropagateIF {
    /// add an assignment at root level as a precondition.
    ///
    /// # Errors
    ///
    /// emit `SolverError::RootLevelConflict` exception if solver becomes inconsistent.
    fn assign_at_root_level(&mut self, l: Lit) -> MaybeInconsistent;
    /// unsafe enqueue (assign by implication); doesn't emit an exception.
    ///
    /// ## Warning
    /// Callers must assure the consistency after this assignment.
    fn assign_by_implication(&mut self, l: Lit, reason: AssignReason, lv: DecisionLevel);
    /// unsafe assume (assign by decision); doesn't emit an exception.
    /// ## Caveat
    /// Callers have to assure the consistency after this assignment.
    fn assign_by_decision(&mut self, l: Lit);
    /// execute *backjump*.
    fn cancel_until(&mut self, lv: DecisionLevel);
    /// execute *boolean constraint propagation* or *unit propagation*.
    fn propagate<C>(&mut self, cdb: &mut C) -> PropagationResult
    where
        C: ClauseDBIF;
}

macro_rules! lit_assign {
    ($asg: expr, $lit: expr) => {
        match $lit {
            l => match $asg.var[l.vi()].assign {
                Some(x) if !bool::from(l) => Some(!x),
                x => x,
            },
        }
    };
}

macro_rules! set_assign {
    ($asg: expr, $lit: expr) => {
        match $lit {
            l => {
                let vi = l.vi();
                $asg.var[vi].assign = Some(bool::from(l));
            }
        }
    };
}

impl PropagateIF for AssignStack {
    fn assign_at_root_level(&mut self, l: Lit) -> MaybeInconsistent {
        debug_assert!(self.trail_lim.is_empty());
        let vi = l.vi();
        debug_assert!(vi < self.var.len());
        match self.var[vi].assign {
            None => {
                set_assign!(self, l);
                self.var[vi].level = 0;
                self.var[vi].reason = AssignReason::Asserted;
                debug_assert!(!self.trail.contains(&!l));
                self.trail.push(l);
                self.num_asserted_vars += 1;
                Ok(())
            }
            Some(x) if x == bool::from(l) => Ok(()),
            _ => Err(SolverError::RootLevelConflict((l, self.var[vi].reason))),
        }
    }
    fn assign_by_implication(&mut self, l: Lit, reason: AssignReason, lv: DecisionLevel) {
        debug_assert!(l.vi() < self.var.len());
        let vi = l.vi();
        debug_assert!(self.var[vi].assign.is_none());
        set_assign!(self, l);
        self.var[vi].level = lv;
        self.var[vi].reason = reason;
        debug_assert!(!self.trail.contains(&l));
        debug_assert!(!self.trail.contains(&!l));
        self.trail.push(l);
        if lv == 0 {
            self.num_asserted_vars += 1;
        }
    }
    fn assign_by_decision(&mut self, l: Lit) {
        debug_assert!(self.var[l.vi()].assign.is_none());
        debug_assert!(
            !self.trail.contains(&!l),
            "asg.trail contains a strange literal",
        );
        self.trail_lim.push(self.trail.len());
        let dl = self.decision_level();
        let vi = l.vi();
        set_assign!(self, l);
        self.var[vi].level = dl;
        self.var[vi].reason = AssignReason::Decision(dl);
        self.trail.push(l);
        self.num_decision += 1;
    }
    fn cancel_until(&mut self, lv: DecisionLevel) {
        if self.trail_lim.len() as DecisionLevel <= lv {
            return;
        }
        let lim = self.trail_lim[lv as usize];
        for i in lim..self.trail.len() {
            let l = self.trail[i];
            let vi = l.vi();
            let v = &mut self.var[vi];
            v.set(FlagVar::PHASE, bool::from(l));
            v.assign = None;
            v.reason = AssignReason::None;
            self.restore_heap(vi);
        }
        self.trail.truncate(lim);
        self.trail_lim.truncate(lv as usize);
        self.q_head = self.q_head.min(lim);
    }
    fn propagate<C>(&mut self, cdb: &mut C) -> PropagationResult
    where
        C: ClauseDBIF,
    {
        let lv = self.decision_level();
        while let Some(&p) = self.trail.get(self.q_head) {
            self.q_head += 1;
            self.num_propagation += 1;
            let false_lit = !p;
            let mut ws = std::mem::take(cdb.watcher_list_mut(false_lit));
            let mut conflict: Option<ConflictContext> = None;
            let mut n = 0;
            let mut i = 0;
            while i < ws.len() && conflict.is_none() {
                let w = ws[i];
                i += 1;
                match w {
                    Watch::Binary { other, .. } => {
                        match lit_assign!(self, other) {
                            Some(true) => (),
                            Some(false) => {
                                conflict = Some((other, AssignReason::BinaryLink(false_lit)))
                            }
                            None => self.assign_by_implication(
                                other,
                                AssignReason::BinaryLink(false_lit),
                                lv,
                            ),
                        }
                        ws[n] = w;
                        n += 1;
                    }
                    Watch::Ternary { others: [a, b], .. } => {
                        match (lit_assign!(self, a), lit_assign!(self, b)) {
                            (Some(true), _) | (_, Some(true)) | (None, None) => (),
                            (Some(false), Some(false)) => {
                                conflict = Some((a, AssignReason::TernaryLink(false_lit, b)))
                            }
                            (Some(false), None) => self.assign_by_implication(
                                b,
                                AssignReason::TernaryLink(false_lit, a),
                                lv,
                            ),
                            (None, Some(false)) => self.assign_by_implication(
                                a,
                                AssignReason::TernaryLink(false_lit, b),
                                lv,
                            ),
                        }
                        ws[n] = w;
                        n += 1;
                    }
                    Watch::Long { cid, blocker } => {
                        if lit_assign!(self, blocker) == Some(true) {
                            ws[n] = w;
                            n += 1;
                            continue;
                        }
                        let c = &mut cdb[cid];
                        if c.lits[0] == false_lit {
                            c.lits.swap(0, 1);
                        }
                        debug_assert_eq!(c.lits[1], false_lit);
                        let first = c.lits[0];
                        if first != blocker && lit_assign!(self, first) == Some(true) {
                            ws[n] = Watch::Long {
                                cid,
                                blocker: first,
                            };
                            n += 1;
                            continue;
                        }
                        let mut new_watch: Option<Lit> = None;
                        for k in 2..c.lits.len() {
                            let lk = c.lits[k];
                            if lit_assign!(self, lk) != Some(false) {
                                c.lits.swap(1, k);
                                new_watch = Some(lk);
                                break;
                            }
                        }
                        if let Some(lk) = new_watch {
                            cdb.watcher_list_mut(lk).push(Watch::Long {
                                cid,
                                blocker: first,
                            });
                            continue;
                        }
                        ws[n] = Watch::Long {
                            cid,
                            blocker: first,
                        };
                        n += 1;
                        match lit_assign!(self, first) {
                            Some(false) => {
                                conflict = Some((first, AssignReason::Implication(cid)));
                            }
                            _ => {
                                self.assign_by_implication(
                                    first,
                                    AssignReason::Implication(cid),
                                    lv,
                                );
                            }
                        }
                    }
                }
            }
            while i < ws.len() {
                ws[n] = ws[i];
                n += 1;
                i += 1;
            }
            ws.truncate(n);
            let slot = cdb.watcher_list_mut(false_lit);
            ws.append(slot);
            *slot = ws;
            if let Some(cc) = conflict {
                return Err(cc);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assign::VarSelectIF, cdb::ClauseDB};

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    fn setup(n: usize) -> (AssignStack, ClauseDB) {
        let cnf = CNFDescription {
            num_of_variables: n,
            ..CNFDescription::default()
        };
        (
            AssignStack::instantiate(&Config::default(), &cnf),
            ClauseDB::instantiate(&Config::default(), &cnf),
        )
    }

    #[test]
    fn test_assign_at_root_level() {
        let (mut asg, _) = setup(4);
        // [] + 1 => [1]
        assert!(asg.assign_at_root_level(lit(1)).is_ok());
        assert_eq!(asg.trail, vec![lit(1)]);
        // [1] + 1 => [1]
        assert!(asg.assign_at_root_level(lit(1)).is_ok());
        assert_eq!(asg.trail, vec![lit(1)]);
        // [1] + -1 => ABORT & [1]
        assert!(asg.assign_at_root_level(lit(-1)).is_err());
        assert_eq!(asg.stack_len(), 1);
        assert_eq!(asg.assigned(lit(-1)), Some(false));
        assert_eq!(asg.assigned(lit(2)), None);
    }
    #[test]
    fn test_propagate_implicit_clauses() {
        let (mut asg, mut cdb) = setup(5);
        cdb.attach_bin(lit(-1), lit(2), false);
        cdb.attach_tri(lit(-2), lit(3), lit(4), false);
        asg.assign_at_root_level(lit(1)).expect("fresh");
        asg.assign_at_root_level(lit(-4)).expect("fresh");
        assert!(asg.propagate(&mut cdb).is_ok());
        assert_eq!(asg.assigned(lit(2)), Some(true));
        assert_eq!(asg.assigned(lit(3)), Some(true));
        assert_eq!(asg.assigned(lit(5)), None);
        assert!(!asg.remains());
    }
    #[test]
    fn test_propagate_long_clause() {
        let (mut asg, mut cdb) = setup(5);
        let cid = cdb.new_clause(&[lit(1), lit(2), lit(3), lit(4)], false);
        for l in [-1, -2, -3] {
            asg.assign_at_root_level(lit(l)).expect("fresh");
        }
        assert!(asg.propagate(&mut cdb).is_ok());
        assert_eq!(asg.assigned(lit(4)), Some(true));
        assert_eq!(asg.reason(4), AssignReason::Implication(cid));
        assert!(cdb.check_watches());
    }
    #[test]
    fn test_propagate_conflict() {
        let (mut asg, mut cdb) = setup(3);
        cdb.attach_bin(lit(-1), lit(2), false);
        cdb.attach_bin(lit(-1), lit(-2), false);
        asg.assign_at_root_level(lit(1)).expect("fresh");
        assert!(asg.propagate(&mut cdb).is_err());
    }
    #[test]
    fn test_cancel_until_restores_heap() {
        let (mut asg, mut cdb) = setup(3);
        let l = asg.select_decision_literal().expect("a decision var");
        asg.assign_by_decision(l);
        assert!(asg.propagate(&mut cdb).is_ok());
        assert_eq!(asg.decision_level(), 1);
        asg.cancel_until(0);
        assert_eq!(asg.decision_level(), 0);
        assert_eq!(asg.assign(l.vi()), None);
        assert!(asg.var_order.contains(l.vi()));
    }
}
