use {
    super::{ReplaceIF, Replacer},
    crate::{
        assign::{AssignIF, PropagateIF, Removed, VarManipulateIF},
        cdb::ClauseDBIF,
        types::*,
    },
};

impl Replacer {
    pub(super) fn merge_lits<A, C>(
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
        debug_assert_eq!(asg.decision_level(), 0);
        debug_assert!(asg.removed(lit1.vi()).is_replaceable());
        debug_assert!(asg.removed(lit2.vi()).is_replaceable());
        let l1 = self.resolve(lit1);
        let l2 = self.resolve(lit2).negate_if(!equal);

        #[cfg(feature = "trace_equivalency")]
        println!(
            "merge {lit1} {} {lit2}, that is {l1} == {l2}",
            if equal { "==" } else { "!=" },
        );

        if l1.vi() == l2.vi() {
            if l1 == l2 {
                return Ok(());
            }
            log::debug!("{lit1} and {lit2} make an inverted cycle");
            if cdb.is_certificate_active() {
                cdb.certificate_add(&[!l1, l2]);
                cdb.certificate_add(&[l1, !l2]);
                cdb.certificate_add(&[l1]);
                cdb.certificate_add(&[!l1]);
                cdb.certificate_add(&[]);
            }
            return Err(SolverError::Inconsistent);
        }
        if cdb.is_certificate_active() {
            cdb.certificate_add(&[!l1, l2]);
            cdb.certificate_add(&[l1, !l2]);
        }
        debug_assert!(asg.removed(l1.vi()).is_replaceable());
        debug_assert!(asg.removed(l2.vi()).is_replaceable());
        match (asg.assigned(l1), asg.assigned(l2)) {
            (Some(v1), Some(v2)) => {
                if v1 == v2 {
                    return Ok(());
                }
                if cdb.is_certificate_active() {
                    cdb.certificate_add(&[!l1]);
                    cdb.certificate_add(&[l1]);
                    cdb.certificate_add(&[]);
                }
                Err(SolverError::Inconsistent)
            }
            (Some(v1), None) => self.enqueue_consistent(asg, cdb, l2.negate_if(!v1)),
            (None, Some(v2)) => self.enqueue_consistent(asg, cdb, l1.negate_if(!v2)),
            (None, None) => {
                if add_later {
                    self.later_add_bin_xor.push((l1, !l2));
                }
                asg.set_removed(l1.vi(), Removed::QueuedReplacer);
                asg.set_removed(l2.vi(), Removed::QueuedReplacer);
                if !self.reverse_table.contains_key(&l1.vi()) {
                    self.reverse_table.entry(l2.vi()).or_default().push(l1.vi());
                    self.table[l1.vi()] = l2.negate_if(!bool::from(l1));
                    log::trace!("var {} -> {}", l1.vi(), self.table[l1.vi()]);
                } else if !self.reverse_table.contains_key(&l2.vi()) {
                    self.reverse_table.entry(l1.vi()).or_default().push(l2.vi());
                    self.table[l2.vi()] = l1.negate_if(!bool::from(l2));
                    log::trace!("var {} -> {}", l2.vi(), self.table[l2.vi()]);
                } else {
                    self.set_all_that_points_here_to(l1.vi(), l2.negate_if(!bool::from(l1)));
                }
                self.replaced_vars += 1;
                Ok(())
            }
        }
    }
    /// assign `l`, the consequence of an equivalence with an assigned literal.
    fn enqueue_consistent<A, C>(&mut self, asg: &mut A, cdb: &mut C, l: Lit) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF,
        C: ClauseDBIF,
    {
        asg.assign_at_root_level(l)?;
        cdb.certificate_add(&[l]);
        asg.propagate(cdb).map_err(SolverError::RootLevelConflict)
    }
    /// redirect representative `vi` and all its dependents to `lit`.
    fn set_all_that_points_here_to(&mut self, vi: VarId, lit: Lit) {
        let target = lit.vi();
        if let Some(deps) = self.reverse_table.remove(&vi) {
            for d in deps {
                debug_assert_eq!(self.table[d].vi(), vi);
                debug_assert_ne!(d, target);
                self.table[d] = lit.negate_if(!bool::from(self.table[d]));
                log::trace!("var {d} -> {}", self.table[d]);
                self.reverse_table.entry(target).or_default().push(d);
            }
        }
        self.table[vi] = lit;
        log::trace!("var {vi} -> {lit}");
        self.reverse_table.entry(target).or_default().push(vi);
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            assign::AssignStack,
            cdb::{CertifiedRecord, ClauseDB},
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

    /// check the flattening and the exactness of the reverse table.
    fn check_forest(rpl: &Replacer) {
        for vi in 1..rpl.table.len() {
            let l = Lit::positive(vi);
            assert_eq!(rpl.resolve(rpl.resolve(l)), rpl.resolve(l));
            let rep = rpl.representative_of(vi);
            if rep != vi {
                assert!(rpl.dependents(rep).contains(&vi));
                assert!(!rpl.is_replaced(Lit::positive(rep)));
            }
        }
        for (rep, deps) in rpl.reverse_table.iter() {
            for d in deps {
                assert_eq!(rpl.representative_of(*d), *rep);
                assert_ne!(d, rep);
            }
        }
    }

    #[test]
    fn test_merge_two_vars() {
        let (mut asg, mut cdb, mut rpl) = setup(3);
        assert!(rpl
            .merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .is_ok());
        assert_eq!(rpl.resolve(lit(1)), lit(2));
        assert_eq!(rpl.resolve(lit(-1)), lit(-2));
        assert_eq!(asg.removed(1), Removed::QueuedReplacer);
        assert_eq!(asg.removed(2), Removed::QueuedReplacer);
        assert_eq!(rpl.num_replaced_vars(), 1);
        check_forest(&rpl);
        // the same equivalence again is a no-op
        assert!(rpl
            .merge(&mut asg, &mut cdb, lit(2), lit(1), true, false)
            .is_ok());
        assert_eq!(rpl.num_replaced_vars(), 1);
        assert_eq!(rpl.dependents(2), &[1]);
    }
    #[test]
    fn test_merge_opposite() {
        let (mut asg, mut cdb, mut rpl) = setup(3);
        assert!(rpl
            .merge(&mut asg, &mut cdb, lit(-1), lit(3), false, false)
            .is_ok());
        // -1 == -3, i.e. 1 == 3
        assert_eq!(rpl.resolve(lit(1)), lit(3));
        check_forest(&rpl);
    }
    #[test]
    fn test_merge_trees() {
        let (mut asg, mut cdb, mut rpl) = setup(6);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        rpl.merge(&mut asg, &mut cdb, lit(3), lit(-4), true, false)
            .expect("consistent");
        rpl.merge(&mut asg, &mut cdb, lit(5), lit(1), true, false)
            .expect("consistent");
        // both 2 and 4 have dependents; the tree of 2 is folded under 4
        rpl.merge(&mut asg, &mut cdb, lit(2), lit(3), true, false)
            .expect("consistent");
        check_forest(&rpl);
        assert_eq!(rpl.representatives(), vec![4]);
        for (l, r) in [(1, -4), (2, -4), (3, -4), (5, -4), (-5, 4)] {
            assert_eq!(rpl.resolve(lit(l)), lit(r));
        }
        assert_eq!(rpl.resolve(lit(6)), lit(6));
        assert_eq!(rpl.num_replaced_vars(), 4);
    }
    #[test]
    fn test_contradiction() {
        let (mut asg, mut cdb, mut rpl) = setup(2);
        assert_eq!(
            rpl.merge(&mut asg, &mut cdb, lit(1), lit(1), false, false),
            Err(SolverError::Inconsistent)
        );
        let (mut asg, mut cdb, mut rpl) = setup(2);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        assert_eq!(
            rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), false, false),
            Err(SolverError::Inconsistent)
        );
        let records = cdb.certificate_records();
        assert_eq!(records.last(), Some(&(CertifiedRecord::Add, vec![])));
    }
    #[test]
    fn test_merge_with_assigned_var() {
        let (mut asg, mut cdb, mut rpl) = setup(3);
        asg.assign_at_root_level(lit(-1)).expect("fresh");
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        assert_eq!(asg.assigned(lit(2)), Some(false));
        assert!(!rpl.is_replaced(lit(2)));
        assert!(!rpl.is_replaced(lit(1)));
        // both assigned with the same value
        assert!(rpl
            .merge(&mut asg, &mut cdb, lit(-1), lit(-2), true, false)
            .is_ok());
        // both assigned with different values
        assert_eq!(
            rpl.merge(&mut asg, &mut cdb, lit(1), lit(-2), true, false),
            Err(SolverError::Inconsistent)
        );
    }
    #[test]
    fn test_merge_with_later_clauses() {
        let (mut asg, mut cdb, mut rpl) = setup(2);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(-2), true, true)
            .expect("consistent");
        assert_eq!(rpl.later_add_bin_xor, vec![(lit(1), lit(2))]);
    }
    #[test]
    fn test_one_set_merge_fails_in_propagation() {
        let (mut asg, mut cdb, mut rpl) = setup(3);
        cdb.attach_bin(lit(-2), lit(3), false);
        cdb.attach_bin(lit(-2), lit(-3), false);
        asg.assign_at_root_level(lit(1)).expect("fresh");
        assert!(asg.propagate(&mut cdb).is_ok());
        // 1 is true, so 2 must be true; then 3 and -3 follow
        assert!(matches!(
            rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false),
            Err(SolverError::RootLevelConflict(_))
        ));
        assert_eq!(asg.assigned(lit(2)), Some(true));
        assert!(cdb
            .certificate_records()
            .contains(&(CertifiedRecord::Add, vec![2])));
        assert!(!rpl.is_replaced(lit(1)));
        assert!(!rpl.is_replaced(lit(2)));
        assert_eq!(asg.removed(2), Removed::None);
        assert_eq!(rpl.num_replaced_vars(), 0);
    }
}
