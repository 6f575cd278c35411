use {
    super::Replacer,
    crate::{
        assign::{AssignIF, PropagateIF, Removed, VarManipulateIF},
        cdb::ClauseDBIF,
        types::*,
    },
};

impl Replacer {
    /// attach the binary clauses and assert the units found by `replace_implicit`,
    /// then propagate once.
    pub(super) fn flush_delayed<A, C>(&mut self, asg: &mut A, cdb: &mut C) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF,
        C: ClauseDBIF,
    {
        for (l1, l2, learnt) in self.delayed_attach_bin.drain(..) {
            cdb.attach_bin(l1, l2, learnt);
        }
        for l in std::mem::take(&mut self.delayed_enqueue) {
            match asg.assigned(l) {
                None => asg.assign_at_root_level(l)?,
                Some(true) => (),
                Some(false) => {
                    cdb.certificate_add(&[]);
                    return Err(SolverError::RootLevelConflict((l, asg.reason(l.vi()))));
                }
            }
        }
        asg.propagate(cdb).map_err(SolverError::RootLevelConflict)
    }
    /// make every var agree with its representative on root level assignments.
    pub(super) fn settle_assignments<A, C>(&mut self, asg: &mut A, cdb: &mut C) -> MaybeInconsistent
    where
        A: AssignIF + PropagateIF + VarManipulateIF,
        C: ClauseDBIF,
    {
        loop {
            let mut updated = false;
            for vi in 1..self.table.len() {
                let rep = self.table[vi];
                if rep.vi() == vi
                    || !asg.removed(rep.vi()).is_replaceable()
                    || matches!(asg.removed(vi), Removed::Eliminated | Removed::Decomposed)
                {
                    continue;
                }
                let unit = match (asg.assigned(Lit::positive(vi)), asg.assigned(rep)) {
                    (None, None) => continue,
                    (Some(x), Some(y)) if x == y => continue,
                    (Some(_), Some(_)) => {
                        log::debug!("var {vi} and its representative {rep} disagree");
                        cdb.certificate_add(&[]);
                        return Err(SolverError::Inconsistent);
                    }
                    (Some(x), None) => rep.negate_if(!x),
                    (None, Some(y)) => Lit::from((vi, y)),
                };
                asg.assign_at_root_level(unit)?;
                cdb.certificate_add(&[unit]);
                asg.propagate(cdb).map_err(SolverError::RootLevelConflict)?;
                updated = true;
            }
            if !updated {
                return Ok(());
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
            cdb::{CertifiedRecord, ClauseDB},
            replacer::ReplaceIF,
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
    fn test_flush_delayed() {
        let (mut asg, mut cdb, mut rpl) = setup(4);
        rpl.delayed_attach_bin.push((lit(-1), lit(3), false));
        rpl.delayed_enqueue.push(lit(1));
        rpl.delayed_enqueue.push(lit(1));
        assert!(rpl.flush_delayed(&mut asg, &mut cdb).is_ok());
        assert_eq!(asg.assigned(lit(3)), Some(true));
        assert!(rpl.delayed_attach_bin.is_empty());
        assert!(rpl.delayed_enqueue.is_empty());
        rpl.delayed_enqueue.push(lit(-3));
        assert!(matches!(
            rpl.flush_delayed(&mut asg, &mut cdb),
            Err(SolverError::RootLevelConflict(_))
        ));
    }
    #[test]
    fn test_settle_assignments() {
        let (mut asg, mut cdb, mut rpl) = setup(4);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(-2), true, false)
            .expect("consistent");
        rpl.merge(&mut asg, &mut cdb, lit(3), lit(4), true, false)
            .expect("consistent");
        asg.assign_at_root_level(lit(1)).expect("fresh");
        asg.assign_at_root_level(lit(4)).expect("fresh");
        assert!(rpl.settle_assignments(&mut asg, &mut cdb).is_ok());
        assert_eq!(asg.assigned(lit(2)), Some(false));
        assert_eq!(asg.assigned(lit(3)), Some(true));
        assert!(cdb
            .certificate_records()
            .contains(&(CertifiedRecord::Add, vec![-2])));
    }
    #[test]
    fn test_settle_disagreement() {
        let (mut asg, mut cdb, mut rpl) = setup(2);
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        asg.assign_at_root_level(lit(1)).expect("fresh");
        asg.assign_at_root_level(lit(-2)).expect("fresh");
        assert_eq!(
            rpl.settle_assignments(&mut asg, &mut cdb),
            Err(SolverError::Inconsistent)
        );
    }
}
