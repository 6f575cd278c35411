use {
    super::{CertificationStore, CertifiedRecord, Clause, ClauseDBIF, ClauseId, Watch},
    crate::{assign::AssignIF, types::*},
    std::{
        fmt,
        ops::{Index, IndexMut},
    },
};

/// Clause database
///
///```
/// use splr_replacer::{config::Config, types::*};
/// use splr_replacer::cdb::ClauseDB;
/// let cdb = ClauseDB::instantiate(&Config::default(), &CNFDescription::default());
///```
#[derive(Clone, Debug)]
pub struct ClauseDB {
    /// container of long clauses; slot 0 is a sentinel
    clause: Vec<Clause>,
    /// ids of dead clauses waiting for reuse
    freelist: Vec<ClauseId>,
    /// per-literal watcher lists
    pub(super) watches: Vec<Vec<Watch>>,
    /// irredundant long clauses
    long_irred: Vec<ClauseId>,
    /// redundant long clauses
    long_red: Vec<ClauseId>,
    certification_store: CertificationStore,

    //
    //## statistics
    //
    /// the number of irredundant binary clauses.
    pub(super) num_bi_clause: usize,
    /// the number of redundant binary clauses.
    pub(super) num_bi_learnt: usize,
    /// the number of irredundant ternary clauses.
    pub(super) num_tri_clause: usize,
    /// the number of redundant ternary clauses.
    pub(super) num_tri_learnt: usize,
    /// the number of irredundant long clauses.
    num_clause: usize,
    /// the number of redundant long clauses.
    num_learnt: usize,
}

impl Default for ClauseDB {
    fn default() -> ClauseDB {
        ClauseDB {
            clause: vec![Clause::default()],
            freelist: Vec::new(),
            watches: vec![Vec::new(); 2],
            long_irred: Vec::new(),
            long_red: Vec::new(),
            certification_store: CertificationStore::default(),
            num_bi_clause: 0,
            num_bi_learnt: 0,
            num_tri_clause: 0,
            num_tri_learnt: 0,
            num_clause: 0,
            num_learnt: 0,
        }
    }
}

impl Index<ClauseId> for ClauseDB {
    type Output = Clause;
    #[inline]
    fn index(&self, cid: ClauseId) -> &Clause {
        &self.clause[usize::from(cid)]
    }
}

impl IndexMut<ClauseId> for ClauseDB {
    #[inline]
    fn index_mut(&mut self, cid: ClauseId) -> &mut Clause {
        &mut self.clause[usize::from(cid)]
    }
}

impl Instantiate for ClauseDB {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> ClauseDB {
        let nv = cnf.num_of_variables;
        ClauseDB {
            clause: Vec::with_capacity(1 + cnf.num_of_clauses),
            watches: vec![Vec::new(); 2 * (nv + 1)],
            certification_store: CertificationStore::instantiate(config, cnf),
            ..ClauseDB::default()
        }
        .with_sentinel()
    }
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::NewVar => {
                self.watches.push(Vec::new());
                self.watches.push(Vec::new());
            }
        }
    }
}

impl ClauseDB {
    fn with_sentinel(mut self) -> Self {
        if self.clause.is_empty() {
            self.clause.push(Clause::default());
        }
        self
    }
}

impl fmt::Display for ClauseDB {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CDB:: bin: {}+{}, tri: {}+{}, long: {}+{}",
            self.num_bi_clause,
            self.num_bi_learnt,
            self.num_tri_clause,
            self.num_tri_learnt,
            self.num_clause,
            self.num_learnt,
        )
    }
}

impl ClauseDBIF for ClauseDB {
    #[inline]
    fn watcher_list(&self, l: Lit) -> &[Watch] {
        &self.watches[l]
    }
    #[inline]
    fn watcher_list_mut(&mut self, l: Lit) -> &mut Vec<Watch> {
        &mut self.watches[l]
    }
    fn attach_bin(&mut self, l0: Lit, l1: Lit, learnt: bool) {
        debug_assert!(l0.vi() != l1.vi());
        self.watches[l0].push(Watch::Binary { other: l1, learnt });
        self.watches[l1].push(Watch::Binary { other: l0, learnt });
        if learnt {
            self.num_bi_learnt += 1;
        } else {
            self.num_bi_clause += 1;
        }
    }
    fn attach_tri(&mut self, l0: Lit, l1: Lit, l2: Lit, learnt: bool) {
        debug_assert!(l0.vi() != l1.vi() && l1.vi() != l2.vi() && l0.vi() != l2.vi());
        self.watches[l0].push(Watch::ternary(l1, l2, learnt));
        self.watches[l1].push(Watch::ternary(l0, l2, learnt));
        self.watches[l2].push(Watch::ternary(l0, l1, learnt));
        if learnt {
            self.num_tri_learnt += 1;
        } else {
            self.num_tri_clause += 1;
        }
    }
    fn new_clause(&mut self, lits: &[Lit], learnt: bool) -> ClauseId {
        debug_assert!(3 < lits.len());
        let cid = if let Some(cid) = self.freelist.pop() {
            let c = &mut self[cid];
            c.lits.clear();
            c.lits.extend_from_slice(lits);
            c.flags = FlagClause::empty();
            cid
        } else {
            self.clause.push(Clause {
                lits: lits.to_vec(),
                flags: FlagClause::empty(),
            });
            ClauseId::from(self.clause.len() - 1)
        };
        self[cid].set(FlagClause::LEARNT, learnt);
        self.attach_clause(cid);
        if learnt {
            self.num_learnt += 1;
            self.long_red.push(cid);
        } else {
            self.num_clause += 1;
            self.long_irred.push(cid);
        }
        cid
    }
    fn attach_clause(&mut self, cid: ClauseId) {
        let c = &self.clause[usize::from(cid)];
        debug_assert!(!c.is(FlagClause::DEAD));
        let (l0, l1) = (c.lits[0], c.lits[1]);
        self.watches[l0].push(Watch::Long { cid, blocker: l1 });
        self.watches[l1].push(Watch::Long { cid, blocker: l0 });
    }
    fn detach_modified_clause(&mut self, orig0: Lit, orig1: Lit, cid: ClauseId) {
        self.watches[orig0].delete_unstable(|w| w.refers(cid));
        self.watches[orig1].delete_unstable(|w| w.refers(cid));
    }
    fn free_clause(&mut self, cid: ClauseId) {
        let c = &mut self.clause[usize::from(cid)];
        debug_assert!(!c.is(FlagClause::DEAD));
        if c.is(FlagClause::LEARNT) {
            self.num_learnt -= 1;
        } else {
            self.num_clause -= 1;
        }
        c.lits.clear();
        c.flags = FlagClause::DEAD;
        self.freelist.push(cid);
    }
    fn long_clauses(&self, learnt: bool) -> &[ClauseId] {
        if learnt {
            &self.long_red
        } else {
            &self.long_irred
        }
    }
    fn long_clauses_mut(&mut self, learnt: bool) -> &mut Vec<ClauseId> {
        if learnt {
            &mut self.long_red
        } else {
            &mut self.long_irred
        }
    }
    fn discount_implicit(
        &mut self,
        bin_irred: usize,
        bin_red: usize,
        tri_irred: usize,
        tri_red: usize,
    ) {
        self.num_bi_clause -= bin_irred;
        self.num_bi_learnt -= bin_red;
        self.num_tri_clause -= tri_irred;
        self.num_tri_learnt -= tri_red;
    }
    fn clean_all<A>(&mut self, asg: &A)
    where
        A: AssignIF,
    {
        debug_assert_eq!(asg.decision_level(), 0);
        debug_assert!(!asg.remains());
        self.clean_implicit(asg);
        self.clean_long(asg, false);
        self.clean_long(asg, true);
    }
    fn check_watches(&self) -> bool {
        for (i, ws) in self.watches.iter().enumerate().skip(2) {
            let l = Lit::from(i);
            for w in ws.iter() {
                match *w {
                    Watch::Binary { other, learnt } => {
                        if !self.watches[other].contains(&Watch::Binary { other: l, learnt }) {
                            log::error!("{l} has a dangling binary watch {w}");
                            return false;
                        }
                    }
                    Watch::Ternary {
                        others: [a, b],
                        learnt,
                    } => {
                        if b <= a
                            || !self.watches[a].contains(&Watch::ternary(l, b, learnt))
                            || !self.watches[b].contains(&Watch::ternary(l, a, learnt))
                        {
                            log::error!("{l} has a dangling ternary watch {w}");
                            return false;
                        }
                    }
                    Watch::Long { cid, .. } => {
                        let c = &self[cid];
                        if c.is(FlagClause::DEAD) || c.len() < 4 || !c.lits[..2].contains(&l) {
                            log::error!("{l} watches {cid}{c} illegally");
                            return false;
                        }
                    }
                }
            }
        }
        for learnt in [false, true] {
            for cid in self.long_clauses(learnt).iter() {
                let c = &self[*cid];
                if c.is(FlagClause::DEAD) || c.is(FlagClause::LEARNT) != learnt {
                    log::error!("{cid}{c} is in a wrong list");
                    return false;
                }
                for l in &c.lits[..2] {
                    if self.watches[*l].iter().filter(|w| w.refers(*cid)).count() != 1 {
                        log::error!("{cid}{c} is not watched by {l} exactly once");
                        return false;
                    }
                }
            }
        }
        true
    }
    fn collect_clauses(&self) -> Vec<Vec<Lit>> {
        let mut vec: Vec<Vec<Lit>> = Vec::new();
        for (i, ws) in self.watches.iter().enumerate().skip(2) {
            let l = Lit::from(i);
            for w in ws.iter() {
                match *w {
                    Watch::Binary { other, .. } if l < other => vec.push(vec![l, other]),
                    Watch::Ternary { others: [a, b], .. } if l < a => vec.push(vec![l, a, b]),
                    _ => (),
                }
            }
        }
        for learnt in [false, true] {
            for cid in self.long_clauses(learnt).iter() {
                vec.push(self[*cid].lits.clone());
            }
        }
        vec
    }
    fn validate(&self, model: &[Option<bool>]) -> Option<Vec<Lit>> {
        let value = |l: &Lit| match model[l.vi()] {
            Some(b) => b == bool::from(*l),
            None => false,
        };
        self.collect_clauses()
            .into_iter()
            .find(|c| !c.iter().any(value))
    }
    fn is_certificate_active(&self) -> bool {
        self.certification_store.is_active()
    }
    fn certificate_add(&mut self, vec: &[Lit]) {
        self.certification_store.push_add(vec);
    }
    fn certificate_delete(&mut self, vec: &[Lit]) {
        self.certification_store.push_delete(vec);
    }
    fn certificate_records(&self) -> &[(CertifiedRecord, Vec<i32>)] {
        self.certification_store.records()
    }
}

pub mod property {
    use super::ClauseDB;
    use crate::types::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Tusize {
        NumBiClause,
        NumBiLearnt,
        NumTriClause,
        NumTriLearnt,
        NumClause,
        NumLearnt,
    }

    pub const USIZES: [Tusize; 6] = [
        Tusize::NumBiClause,
        Tusize::NumBiLearnt,
        Tusize::NumTriClause,
        Tusize::NumTriLearnt,
        Tusize::NumClause,
        Tusize::NumLearnt,
    ];

    impl PropertyDereference<Tusize, usize> for ClauseDB {
        #[inline]
        fn derefer(&self, k: Tusize) -> usize {
            match k {
                Tusize::NumBiClause => self.num_bi_clause,
                Tusize::NumBiLearnt => self.num_bi_learnt,
                Tusize::NumTriClause => self.num_tri_clause,
                Tusize::NumTriLearnt => self.num_tri_learnt,
                Tusize::NumClause => self.num_clause,
                Tusize::NumLearnt => self.num_learnt,
            }
        }
    }
}
