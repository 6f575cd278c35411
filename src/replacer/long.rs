use {
    super::{ReplaceIF, Replacer},
    crate::{
        assign::{AssignIF, PropagateIF},
        cdb::{ClauseDBIF, ClauseId},
        types::*,
    },
};

impl Replacer {
    /// rewrite the long clauses of a list, irredundant or redundant.
    pub(super) fn replace_set<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        learnt: bool,
    ) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF,
        C: ClauseDBIF,
    {
        let mut list = std::mem::take(cdb.long_clauses_mut(learnt));
        let mut result = Ok(());
        let mut i = 0;
        let mut j = 0;
        while i < list.len() {
            let cid = list[i];
            i += 1;
            let mut orig: Option<Vec<Lit>> = None;
            for k in 0..cdb[cid].lits.len() {
                let l = cdb[cid].lits[k];
                if self.is_replaced(l) {
                    if orig.is_none() {
                        orig = Some(cdb[cid].lits.clone());
                    }
                    cdb[cid].lits[k] = self.resolve(l);
                    self.run_stats.replaced_lits += 1;
                }
            }
            let Some(orig) = orig else {
                list[j] = cid;
                j += 1;
                continue;
            };
            let kept = self.handle_updated_clause(asg, cdb, cid, &orig);
            cdb.certificate_delete(&orig);
            match kept {
                Ok(true) => {
                    list[j] = cid;
                    j += 1;
                }
                Ok(false) => (),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        if result.is_err() {
            while i < list.len() {
                list[j] = list[i];
                i += 1;
                j += 1;
            }
        }
        list.truncate(j);
        debug_assert!(cdb.long_clauses(learnt).is_empty());
        *cdb.long_clauses_mut(learnt) = list;
        result
    }
    /// simplify a clause whose literals were just rewritten; `orig` is the old
    /// literal sequence. Return `Ok(true)` if it is still a long clause.
    fn handle_updated_clause<A, C>(
        &mut self,
        asg: &mut A,
        cdb: &mut C,
        cid: ClauseId,
        orig: &[Lit],
    ) -> Result<bool, SolverError>
    where
        A: AssignIF + PropagateIF,
        C: ClauseDBIF,
    {
        let mut lits = std::mem::take(&mut cdb[cid].lits);
        lits.sort_unstable();
        let mut satisfied = false;
        let mut p: Option<Lit> = None;
        let mut j = 0;
        for k in 0..lits.len() {
            let l = lits[k];
            match asg.assigned(l) {
                Some(true) => {
                    satisfied = true;
                    break;
                }
                Some(false) => continue,
                None => (),
            }
            if p == Some(!l) {
                satisfied = true;
                break;
            }
            if p == Some(l) {
                continue;
            }
            lits[j] = l;
            j += 1;
            p = Some(l);
        }
        lits.truncate(j);
        cdb.detach_modified_clause(orig[0], orig[1], cid);
        if satisfied {
            cdb.free_clause(cid);
            self.run_stats.removed_long_clauses += 1;
            return Ok(false);
        }
        cdb.certificate_add(&lits);
        match lits.len() {
            0 => {
                cdb.free_clause(cid);
                self.run_stats.removed_long_clauses += 1;
                Err(SolverError::EmptyClause)
            }
            1 => {
                cdb.free_clause(cid);
                self.run_stats.removed_long_clauses += 1;
                self.run_stats.removed_long_lits += orig.len();
                asg.assign_at_root_level(lits[0])?;
                asg.propagate(cdb).map_err(SolverError::RootLevelConflict)?;
                Ok(false)
            }
            2 => {
                let learnt = cdb[cid].is(FlagClause::LEARNT);
                cdb.free_clause(cid);
                self.run_stats.removed_long_clauses += 1;
                self.run_stats.removed_long_lits += orig.len();
                cdb.attach_bin(lits[0], lits[1], learnt);
                Ok(false)
            }
            3 => {
                let learnt = cdb[cid].is(FlagClause::LEARNT);
                cdb.free_clause(cid);
                self.run_stats.removed_long_clauses += 1;
                self.run_stats.removed_long_lits += orig.len();
                cdb.attach_tri(lits[0], lits[1], lits[2], learnt);
                Ok(false)
            }
            n => {
                self.run_stats.removed_long_lits += orig.len() - n;
                let c = &mut cdb[cid];
                c.lits = lits;
                c.turn_on(FlagClause::CHANGED);
                cdb.attach_clause(cid);
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            assign::AssignStack,
            cdb::{property::Tusize, CertifiedRecord, ClauseDB},
        },
    };

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    fn setup(n: usize) -> (AssignStack, ClauseDB, Replacer) {
        let config = Config::default().with_memory_certification();
        let cnf = CNFDescription {
            num_of_variables: n,
            ..CNFDescription::default()
        };
        (
            AssignStack::instantiate(&config, &cnf),
            ClauseDB::instantiate(&config, &cnf),
            Replacer::instantiate(&config, &cnf),
        )
    }

    #[test]
    fn test_replace_set_by_size() {
        let (mut asg, mut cdb, mut rpl) = setup(9);
        let c1 = cdb.new_clause(&[lit(1), lit(3), lit(4), lit(5), lit(6)], false);
        let c2 = cdb.new_clause(&[lit(1), lit(2), lit(3), lit(4)], false);
        let c3 = cdb.new_clause(&[lit(1), lit(-2), lit(3), lit(4)], false);
        let c4 = cdb.new_clause(&[lit(7), lit(8), lit(9), lit(3)], true);
        let c5 = cdb.new_clause(&[lit(2), lit(7), lit(8), lit(9)], true);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        assert!(rpl.replace_set(&mut asg, &mut cdb, false).is_ok());
        assert!(rpl.replace_set(&mut asg, &mut cdb, true).is_ok());
        assert!(cdb.check_watches());
        // [2, 3, 4, 5, 6] stays long
        assert_eq!(cdb[c1].lits(), &[lit(2), lit(3), lit(4), lit(5), lit(6)]);
        assert!(cdb[c1].is(FlagClause::CHANGED));
        // [2, 2, 3, 4] shrinks into a ternary clause
        assert!(cdb[c2].is(FlagClause::DEAD));
        // [2, -2, 3, 4] is a tautology
        assert!(cdb[c3].is(FlagClause::DEAD));
        // untouched
        assert!(!cdb[c4].is(FlagClause::CHANGED));
        assert!(!cdb[c5].is(FlagClause::DEAD));
        assert_eq!(cdb.long_clauses(false), &[c1]);
        assert_eq!(cdb.long_clauses(true).len(), 2);
        assert_eq!(cdb.derefer(Tusize::NumTriClause), 1);
        assert_eq!(rpl.run_stats.removed_long_clauses, 2);
        assert_eq!(rpl.run_stats.removed_long_lits, 4);
        assert_eq!(rpl.run_stats.replaced_lits, 3);
        let records = cdb.certificate_records();
        assert!(records.contains(&(CertifiedRecord::Add, vec![2, 3, 4])));
        assert!(records.contains(&(CertifiedRecord::Delete, vec![1, 2, 3, 4])));
        assert!(records.contains(&(CertifiedRecord::Delete, vec![1, -2, 3, 4])));
    }
    #[test]
    fn test_replace_set_to_unit() {
        let (mut asg, mut cdb, mut rpl) = setup(5);
        let cid = cdb.new_clause(&[lit(1), lit(2), lit(3), lit(4)], false);
        cdb.attach_bin(lit(-5), lit(-2), false);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        rpl.merge(&mut asg, &mut cdb, lit(3), lit(2), true, false)
            .expect("consistent");
        rpl.merge(&mut asg, &mut cdb, lit(4), lit(2), true, false)
            .expect("consistent");
        assert!(rpl.replace_set(&mut asg, &mut cdb, false).is_ok());
        assert!(cdb[cid].is(FlagClause::DEAD));
        assert!(cdb.long_clauses(false).is_empty());
        assert_eq!(asg.assigned(lit(2)), Some(true));
        assert_eq!(asg.assigned(lit(5)), Some(false));
        assert_eq!(rpl.run_stats.removed_long_lits, 4);
    }
    #[test]
    fn test_replace_set_keeps_the_rest_on_failure() {
        let (mut asg, mut cdb, mut rpl) = setup(8);
        let c1 = cdb.new_clause(&[lit(1), lit(2), lit(3), lit(4)], false);
        let c2 = cdb.new_clause(&[lit(5), lit(6), lit(7), lit(8)], false);
        cdb.attach_bin(lit(-2), lit(-3), false);
        cdb.attach_bin(lit(-2), lit(3), false);
        for v in [1, 3, 4] {
            rpl.merge(&mut asg, &mut cdb, lit(v), lit(2), true, false)
                .expect("consistent");
        }
        // the unit 2 conflicts with the binary clauses above
        assert!(rpl.replace_set(&mut asg, &mut cdb, false).is_err());
        assert!(cdb[c1].is(FlagClause::DEAD));
        assert_eq!(cdb.long_clauses(false), &[c2]);
    }
    #[test]
    fn test_replace_set_with_root_assignments() {
        let (mut asg, mut cdb, mut rpl) = setup(7);
        let c1 = cdb.new_clause(&[lit(1), lit(3), lit(4), lit(6)], false);
        let c2 = cdb.new_clause(&[lit(1), lit(3), lit(5), lit(6), lit(7)], false);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        asg.assign_at_root_level(lit(4)).expect("unassigned");
        asg.assign_at_root_level(lit(-5)).expect("unassigned");
        assert!(asg.propagate(&mut cdb).is_ok());
        assert!(rpl.replace_set(&mut asg, &mut cdb, false).is_ok());
        // 4 is true
        assert!(cdb[c1].is(FlagClause::DEAD));
        // -5 is dropped
        assert_eq!(cdb[c2].lits(), &[lit(2), lit(3), lit(6), lit(7)]);
        assert_eq!(cdb.long_clauses(false), &[c2]);
        assert_eq!(rpl.run_stats.removed_long_clauses, 1);
        assert_eq!(rpl.run_stats.removed_long_lits, 1);
        assert!(cdb.check_watches());
        let records = cdb.certificate_records();
        assert!(records.contains(&(CertifiedRecord::Delete, vec![1, 3, 4, 6])));
        assert!(!records.contains(&(CertifiedRecord::Add, vec![2, 3, 4, 6])));
        assert!(records.contains(&(CertifiedRecord::Add, vec![2, 3, 6, 7])));
    }
    #[test]
    fn test_replace_set_to_empty_clause() {
        let (mut asg, mut cdb, mut rpl) = setup(5);
        let cid = cdb.new_clause(&[lit(1), lit(3), lit(4), lit(5)], false);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        // no propagation; every literal is false once 1 is read as 2
        for l in [-2, -3, -4, -5] {
            asg.assign_at_root_level(lit(l)).expect("unassigned");
        }
        assert_eq!(
            rpl.replace_set(&mut asg, &mut cdb, false),
            Err(SolverError::EmptyClause)
        );
        assert!(cdb[cid].is(FlagClause::DEAD));
        assert!(cdb.long_clauses(false).is_empty());
        assert_eq!(
            cdb.certificate_records().last(),
            Some(&(CertifiedRecord::Delete, vec![1, 3, 4, 5]))
        );
        assert!(cdb
            .certificate_records()
            .contains(&(CertifiedRecord::Add, vec![])));
    }
}
