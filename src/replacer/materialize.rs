use {
    super::{ReplaceIF, Replacer},
    crate::{
        assign::{AssignIF, PropagateIF, Removed, VarManipulateIF},
        cdb::ClauseDBIF,
        types::*,
    },
};

impl Replacer {
    pub(super) fn add_clause_through_table<A, C>(
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
        debug_assert_eq!(asg.decision_level(), 0);
        let mut changed = false;
        let mut v = lits
            .iter()
            .map(|l| {
                if asg.removed(l.vi()) == Removed::Replaced {
                    let r = self.resolve(*l);
                    changed |= r != *l;
                    r
                } else {
                    *l
                }
            })
            .collect::<Vec<Lit>>();
        v.sort_unstable();
        let mut p: Option<Lit> = None;
        let mut j = 0;
        for k in 0..v.len() {
            let l = v[k];
            match asg.assigned(l) {
                Some(true) => return Ok(()),
                Some(false) => continue,
                None => (),
            }
            if p == Some(!l) {
                return Ok(());
            }
            if p == Some(l) {
                continue;
            }
            v[j] = l;
            j += 1;
            p = Some(l);
        }
        changed |= j != v.len();
        v.truncate(j);
        if changed {
            cdb.certificate_add(&v);
        }
        match v.len() {
            0 => Err(SolverError::EmptyClause),
            1 => {
                asg.assign_at_root_level(v[0])?;
                asg.propagate(cdb).map_err(SolverError::RootLevelConflict)
            }
            2 => {
                cdb.attach_bin(v[0], v[1], learnt);
                Ok(())
            }
            3 => {
                cdb.attach_tri(v[0], v[1], v[2], learnt);
                Ok(())
            }
            _ => {
                cdb.new_clause(&v, learnt);
                Ok(())
            }
        }
    }
}
