use {
    super::{ClauseDB, ClauseDBIF, Watch},
    crate::{assign::AssignIF, types::*},
};

impl ClauseDB {
    /// drop satisfied binary and ternary clauses, and shrink ternary clauses
    /// having a false literal into binary ones.
    /// Each watch occurrence is handled locally; counters and the certificate are
    /// updated at the occurrence held by the smallest literal.
    pub(super) fn clean_implicit<A>(&mut self, asg: &A)
    where
        A: AssignIF,
    {
        for i in 2..self.watches.len() {
            let l = Lit::from(i);
            let vl = asg.assigned(l);
            let mut ws = std::mem::take(&mut self.watches[i]);
            let mut j = 0;
            for k in 0..ws.len() {
                let w = ws[k];
                match w {
                    Watch::Binary { other, learnt } => {
                        if vl == Some(true) || asg.assigned(other) == Some(true) {
                            if l < other {
                                if learnt {
                                    self.num_bi_learnt -= 1;
                                } else {
                                    self.num_bi_clause -= 1;
                                }
                                self.certificate_delete(&[l, other]);
                            }
                            continue;
                        }
                        debug_assert!(vl.is_none() && asg.assigned(other).is_none());
                    }
                    Watch::Ternary {
                        others: [a, b],
                        learnt,
                    } => {
                        let va = asg.assigned(a);
                        let vb = asg.assigned(b);
                        if [vl, va, vb].contains(&Some(true)) {
                            if l < a {
                                if learnt {
                                    self.num_tri_learnt -= 1;
                                } else {
                                    self.num_tri_clause -= 1;
                                }
                                self.certificate_delete(&[l, a, b]);
                            }
                            continue;
                        }
                        let remain = [l, a, b]
                            .into_iter()
                            .filter(|x| asg.assigned(*x).is_none())
                            .collect::<Vec<Lit>>();
                        if remain.len() == 3 {
                            ws[j] = w;
                            j += 1;
                            continue;
                        }
                        assert_eq!(
                            remain.len(),
                            2,
                            "clean_all found an unpropagated ternary clause {:?}",
                            i32s(&[l, a, b]),
                        );
                        if l < a {
                            if learnt {
                                self.num_tri_learnt -= 1;
                                self.num_bi_learnt += 1;
                            } else {
                                self.num_tri_clause -= 1;
                                self.num_bi_clause += 1;
                            }
                            self.certificate_add(&remain);
                            self.certificate_delete(&[l, a, b]);
                        }
                        if vl.is_some() {
                            continue;
                        }
                        let other = if va.is_some() { b } else { a };
                        ws[j] = Watch::Binary { other, learnt };
                        j += 1;
                        continue;
                    }
                    Watch::Long { .. } => (),
                }
                ws[j] = w;
                j += 1;
            }
            ws.truncate(j);
            self.watches[i] = ws;
        }
    }
    /// drop satisfied long clauses and strip false literals from the others.
    pub(super) fn clean_long<A>(&mut self, asg: &A, learnt: bool)
    where
        A: AssignIF,
    {
        let mut list = std::mem::take(self.long_clauses_mut(learnt));
        let mut j = 0;
        for k in 0..list.len() {
            let cid = list[k];
            let c = &self[cid];
            if c.iter().any(|l| asg.assigned(*l) == Some(true)) {
                let orig = c.lits.clone();
                self.detach_modified_clause(orig[0], orig[1], cid);
                self.certificate_delete(&orig);
                self.free_clause(cid);
                continue;
            }
            if c.iter().all(|l| asg.assigned(*l).is_none()) {
                list[j] = cid;
                j += 1;
                continue;
            }
            let orig = c.lits.clone();
            let lits = orig
                .iter()
                .filter(|l| asg.assigned(**l).is_none())
                .copied()
                .collect::<Vec<Lit>>();
            self.certificate_add(&lits);
            self.certificate_delete(&orig);
            self.detach_modified_clause(orig[0], orig[1], cid);
            match lits.len() {
                0 | 1 => panic!(
                    "clean_all found an unpropagated clause {:?}",
                    i32s(&orig)
                ),
                2 => {
                    self.free_clause(cid);
                    self.attach_bin(lits[0], lits[1], learnt);
                }
                3 => {
                    self.free_clause(cid);
                    self.attach_tri(lits[0], lits[1], lits[2], learnt);
                }
                _ => {
                    let c = &mut self[cid];
                    c.lits = lits;
                    c.turn_on(FlagClause::CHANGED);
                    self.attach_clause(cid);
                    list[j] = cid;
                    j += 1;
                }
            }
        }
        list.truncate(j);
        *self.long_clauses_mut(learnt) = list;
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            assign::{AssignStack, PropagateIF},
            cdb::{property::Tusize, CertifiedRecord},
        },
    };

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    fn setup(n: usize) -> (AssignStack, ClauseDB) {
        let config = Config::default().with_memory_certification();
        let cnf = CNFDescription {
            num_of_variables: n,
            ..CNFDescription::default()
        };
        (
            AssignStack::instantiate(&config, &cnf),
            ClauseDB::instantiate(&config, &cnf),
        )
    }

    #[test]
    fn test_clean_implicit() {
        let (mut asg, mut cdb) = setup(6);
        cdb.attach_bin(lit(1), lit(2), false);
        cdb.attach_bin(lit(3), lit(4), false);
        cdb.attach_tri(lit(-1), lit(5), lit(6), true);
        cdb.attach_tri(lit(1), lit(-5), lit(6), false);
        asg.assign_at_root_level(lit(1)).expect("fresh");
        assert!(asg.propagate(&mut cdb).is_ok());
        cdb.clean_all(&asg);
        assert!(cdb.check_watches());
        assert_eq!(cdb.derefer(Tusize::NumBiClause), 1);
        assert_eq!(cdb.derefer(Tusize::NumBiLearnt), 1);
        assert_eq!(cdb.derefer(Tusize::NumTriClause), 0);
        assert_eq!(cdb.derefer(Tusize::NumTriLearnt), 0);
        let mut clauses = cdb.collect_clauses();
        clauses.sort();
        assert_eq!(clauses, vec![vec![lit(3), lit(4)], vec![lit(5), lit(6)]]);
        assert!(cdb.watcher_list(lit(1)).is_empty());
        assert!(cdb.watcher_list(lit(-1)).is_empty());
        assert!(cdb
            .certificate_records()
            .contains(&(CertifiedRecord::Add, vec![5, 6])));
    }
    #[test]
    fn test_clean_long() {
        let (mut asg, mut cdb) = setup(8);
        let c1 = cdb.new_clause(&[lit(1), lit(2), lit(3), lit(4)], false);
        let c2 = cdb.new_clause(&[lit(-1), lit(2), lit(3), lit(4), lit(5)], false);
        let c3 = cdb.new_clause(&[lit(-1), lit(6), lit(7), lit(8)], true);
        asg.assign_at_root_level(lit(1)).expect("fresh");
        assert!(asg.propagate(&mut cdb).is_ok());
        cdb.clean_all(&asg);
        assert!(cdb.check_watches());
        assert!(cdb[c1].is(FlagClause::DEAD));
        assert_eq!(cdb[c2].lits(), &[lit(2), lit(3), lit(4), lit(5)]);
        assert!(cdb[c3].is(FlagClause::DEAD));
        assert_eq!(cdb.long_clauses(false), &[c2]);
        assert!(cdb.long_clauses(true).is_empty());
        assert_eq!(cdb.derefer(Tusize::NumTriLearnt), 1);
        let mut clauses = cdb.collect_clauses();
        clauses.sort();
        assert_eq!(
            clauses,
            vec![
                vec![lit(2), lit(3), lit(4), lit(5)],
                vec![lit(6), lit(7), lit(8)],
            ]
        );
    }
}
