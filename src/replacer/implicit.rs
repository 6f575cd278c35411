use {
    super::{ReplaceIF, Replacer},
    crate::{
        assign::AssignIF,
        cdb::{ClauseDBIF, Watch},
        types::*,
    },
};

/// what becomes of a watch after rewriting
enum Outcome {
    Removed,
    Stay(Watch),
    /// the watch should be held by the list of the literal
    Moved(Lit, Watch),
}

/// removed watch occurrences; a binary clause has two, a ternary one three.
#[derive(Debug, Default)]
struct ImplicitTally {
    bin_irred: usize,
    bin_red: usize,
    tri_irred: usize,
    tri_red: usize,
}

impl ImplicitTally {
    fn count_bin(&mut self, learnt: bool) {
        if learnt {
            self.bin_red += 1;
        } else {
            self.bin_irred += 1;
        }
    }
    fn count_tri(&mut self, learnt: bool) {
        if learnt {
            self.tri_red += 1;
        } else {
            self.tri_irred += 1;
        }
    }
}

impl Replacer {
    /// rewrite binary and ternary clauses in all watcher lists.
    /// Resulting units and binary clauses are queued in `delayed_enqueue` and
    /// `delayed_attach_bin`.
    pub(super) fn replace_implicit<A, C>(&mut self, asg: &A, cdb: &mut C)
    where
        A: AssignIF,
        C: ClauseDBIF,
    {
        let mut tally = ImplicitTally::default();
        for i in 2..2 * (asg.num_vars() + 1) {
            let owner = Lit::from(i);
            let mut ws = std::mem::take(cdb.watcher_list_mut(owner));
            let mut j = 0;
            for k in 0..ws.len() {
                let outcome = match ws[k] {
                    Watch::Binary { other, learnt } => {
                        self.update_bin(cdb, &mut tally, owner, other, learnt)
                    }
                    Watch::Ternary {
                        others: [a, b],
                        learnt,
                    } => self.update_tri(cdb, &mut tally, owner, a, b, learnt),
                    w @ Watch::Long { .. } => Outcome::Stay(w),
                };
                match outcome {
                    Outcome::Removed => (),
                    Outcome::Stay(w) => {
                        ws[j] = w;
                        j += 1;
                    }
                    Outcome::Moved(l, w) => {
                        debug_assert_ne!(l, owner);
                        cdb.watcher_list_mut(l).push(w);
                    }
                }
            }
            ws.truncate(j);
            // watches moved here while the list was taken out
            let slot = cdb.watcher_list_mut(owner);
            ws.append(slot);
            *slot = ws;
        }
        self.update_stats_from_tally(cdb, tally);
    }
    fn update_bin<C>(
        &mut self,
        cdb: &mut C,
        tally: &mut ImplicitTally,
        orig1: Lit,
        orig2: Lit,
        learnt: bool,
    ) -> Outcome
    where
        C: ClauseDBIF,
    {
        let lit1 = self.resolve(orig1);
        let lit2 = self.resolve(orig2);
        if lit1 != orig1 {
            self.run_stats.replaced_lits += 1;
        }
        if lit2 != orig2 {
            self.run_stats.replaced_lits += 1;
        }
        let remove = if lit1 == lit2 {
            self.delayed_enqueue.push(lit2);
            if orig1 < orig2 {
                cdb.certificate_add(&[lit2]);
            }
            true
        } else {
            lit1 == !lit2
        };
        if remove {
            tally.count_bin(learnt);
            if orig1 < orig2 {
                cdb.certificate_delete(&[orig1, orig2]);
            }
            return Outcome::Removed;
        }
        if (lit1 != orig1 || lit2 != orig2) && orig1 < orig2 {
            cdb.certificate_add(&[lit1, lit2]);
            cdb.certificate_delete(&[orig1, orig2]);
        }
        let w = Watch::Binary {
            other: lit2,
            learnt,
        };
        if lit1 != orig1 {
            Outcome::Moved(lit1, w)
        } else {
            Outcome::Stay(w)
        }
    }
    /// `orig2` and `orig3` are the partners of `orig1` in ascending order.
    fn update_tri<C>(
        &mut self,
        cdb: &mut C,
        tally: &mut ImplicitTally,
        orig1: Lit,
        orig2: Lit,
        orig3: Lit,
        learnt: bool,
    ) -> Outcome
    where
        C: ClauseDBIF,
    {
        debug_assert!(orig2 < orig3);
        // the occurrence held by the smallest literal does the bookkeeping
        let once = orig1 < orig2;
        let lit1 = self.resolve(orig1);
        let lit2 = self.resolve(orig2);
        let lit3 = self.resolve(orig3);
        for (l, o) in [(lit1, orig1), (lit2, orig2), (lit3, orig3)] {
            if l != o {
                self.run_stats.replaced_lits += 1;
            }
        }
        let remove = if lit1 == !lit2 || lit1 == !lit3 || lit2 == !lit3 {
            true
        } else if lit1 == lit2 && lit2 == lit3 {
            self.delayed_enqueue.push(lit1);
            if once {
                cdb.certificate_add(&[lit1]);
            }
            true
        } else if lit1 == lit2 {
            self.new_bin_clause(cdb, lit1, lit3, learnt, once);
            true
        } else if lit1 == lit3 || lit2 == lit3 {
            self.new_bin_clause(cdb, lit1, lit2, learnt, once);
            true
        } else {
            false
        };
        if remove {
            tally.count_tri(learnt);
            if once {
                cdb.certificate_delete(&[orig1, orig2, orig3]);
            }
            return Outcome::Removed;
        }
        let mut sorted = [lit1, lit2, lit3];
        sorted.sort_unstable();
        if once && (lit1 != orig1 || lit2 != orig2 || lit3 != orig3) {
            cdb.certificate_add(&sorted);
            cdb.certificate_delete(&[orig1, orig2, orig3]);
        }
        // the k-th occurrence of the old clause becomes the k-th one of the new clause
        let rank = if orig1 < orig2 {
            0
        } else if orig1 < orig3 {
            1
        } else {
            2
        };
        let owner = sorted[rank];
        let (a, b) = match rank {
            0 => (sorted[1], sorted[2]),
            1 => (sorted[0], sorted[2]),
            _ => (sorted[0], sorted[1]),
        };
        let w = Watch::ternary(a, b, learnt);
        if owner != orig1 {
            Outcome::Moved(owner, w)
        } else {
            Outcome::Stay(w)
        }
    }
    fn new_bin_clause<C>(&mut self, cdb: &mut C, l1: Lit, l2: Lit, learnt: bool, once: bool)
    where
        C: ClauseDBIF,
    {
        if once {
            self.delayed_attach_bin.push((l1, l2, learnt));
            cdb.certificate_add(&[l1, l2]);
        }
    }
    fn update_stats_from_tally<C>(&mut self, cdb: &mut C, tally: ImplicitTally)
    where
        C: ClauseDBIF,
    {
        debug_assert_eq!(tally.bin_irred % 2, 0);
        debug_assert_eq!(tally.bin_red % 2, 0);
        debug_assert_eq!(tally.tri_irred % 3, 0);
        debug_assert_eq!(tally.tri_red % 3, 0);
        cdb.discount_implicit(
            tally.bin_irred / 2,
            tally.bin_red / 2,
            tally.tri_irred / 3,
            tally.tri_red / 3,
        );
        self.run_stats.removed_bin_clauses += (tally.bin_irred + tally.bin_red) / 2;
        self.run_stats.removed_tri_clauses += (tally.tri_irred + tally.tri_red) / 3;
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
    fn test_replace_implicit() {
        let (mut asg, mut cdb, mut rpl) = setup(5);
        cdb.attach_bin(lit(1), lit(3), false);
        cdb.attach_bin(lit(-2), lit(3), false);
        cdb.attach_bin(lit(1), lit(2), true);
        cdb.attach_tri(lit(1), lit(-2), lit(4), false);
        cdb.attach_tri(lit(1), lit(2), lit(5), false);
        cdb.attach_tri(lit(-1), lit(3), lit(4), false);
        // 1 is replaced by 2
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(2), true, false)
            .expect("consistent");
        assert_eq!(rpl.resolve(lit(1)), lit(2));
        rpl.replace_implicit(&asg, &mut cdb);
        assert!(cdb.check_watches());
        let mut clauses = cdb.collect_clauses();
        clauses.sort();
        assert_eq!(
            clauses,
            vec![
                vec![lit(-2), lit(3)],
                vec![lit(-2), lit(3), lit(4)],
                vec![lit(2), lit(3)],
            ]
        );
        assert_eq!(rpl.delayed_enqueue, vec![lit(2), lit(2)]);
        assert_eq!(rpl.delayed_attach_bin, vec![(lit(2), lit(5), false)]);
        assert_eq!(cdb.derefer(Tusize::NumBiClause), 2);
        assert_eq!(cdb.derefer(Tusize::NumBiLearnt), 0);
        assert_eq!(cdb.derefer(Tusize::NumTriClause), 1);
        assert_eq!(rpl.run_stats.removed_bin_clauses, 1);
        assert_eq!(rpl.run_stats.removed_tri_clauses, 2);
        // [1, 3] is rewritten once in each of its two occurrences
        assert!(0 < rpl.run_stats.replaced_lits);
        let records = cdb.certificate_records();
        assert!(records.contains(&(CertifiedRecord::Add, vec![2, 3])));
        assert!(records.contains(&(CertifiedRecord::Delete, vec![1, 3])));
        assert!(records.contains(&(CertifiedRecord::Add, vec![2])));
        assert!(records.contains(&(CertifiedRecord::Add, vec![2, 5])));
        assert_eq!(
            records
                .iter()
                .filter(|r| **r == (CertifiedRecord::Add, vec![2, 3]))
                .count(),
            1
        );
    }
    #[test]
    fn test_ternary_watches_follow_ranks() {
        let (mut asg, mut cdb, mut rpl) = setup(6);
        cdb.attach_tri(lit(1), lit(3), lit(5), false);
        // 1 -> -6 changes the smallest literal into the largest one
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(-6), true, false)
            .expect("consistent");
        rpl.replace_implicit(&asg, &mut cdb);
        assert!(cdb.check_watches());
        assert_eq!(cdb.collect_clauses(), vec![vec![lit(3), lit(5), lit(-6)]]);
        assert_eq!(cdb.watcher_list(lit(-6)).len(), 1);
        assert!(cdb.watcher_list(lit(1)).is_empty());
        assert_eq!(cdb.derefer(Tusize::NumTriClause), 1);
    }
}
