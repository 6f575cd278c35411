use crate::{
    replacer::{ReplaceIF, Replacer},
    types::*,
};

/// Per-literal dominators found by stamping in the binary implication graph.
/// A dominator is a literal implying the owner; it must be kept in the
/// representative space of the replacer.
#[derive(Clone, Debug, Default)]
pub struct Stamp {
    dominator: Vec<Option<Lit>>,
}

impl Instantiate for Stamp {
    fn instantiate(_config: &Config, cnf: &CNFDescription) -> Stamp {
        Stamp {
            dominator: vec![None; 2 * (cnf.num_of_variables + 1)],
        }
    }
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::NewVar => {
                self.dominator.push(None);
                self.dominator.push(None);
            }
        }
    }
}

impl Stamp {
    pub fn dominator(&self, l: Lit) -> Option<Lit> {
        self.dominator[usize::from(l)]
    }
    pub fn set_dominator(&mut self, l: Lit, dom: Lit) {
        debug_assert_ne!(l.vi(), dom.vi());
        self.dominator[usize::from(l)] = Some(dom);
    }
    /// rewrite dominators with their representatives. A dominator collapsing
    /// onto the var of its owner is dropped.
    pub fn update_dominators(&mut self, rpl: &Replacer) {
        for (i, d) in self.dominator.iter_mut().enumerate().skip(2) {
            if let Some(dom) = d {
                let rep = rpl.resolve(*dom);
                if rep.vi() == rpl.representative_of(Lit::from(i).vi()) {
                    *d = None;
                } else {
                    *d = Some(rep);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{assign::AssignStack, cdb::ClauseDB},
    };

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }

    #[test]
    fn test_update_dominators() {
        let cnf = CNFDescription {
            num_of_variables: 4,
            ..CNFDescription::default()
        };
        let config = Config::default();
        let mut asg = AssignStack::instantiate(&config, &cnf);
        let mut cdb = ClauseDB::instantiate(&config, &cnf);
        let mut rpl = Replacer::instantiate(&config, &cnf);
        let mut stamp = Stamp::instantiate(&config, &cnf);
        stamp.set_dominator(lit(1), lit(2));
        stamp.set_dominator(lit(-3), lit(4));
        stamp.set_dominator(lit(4), lit(1));
        rpl.merge(&mut asg, &mut cdb, lit(2), lit(-3), true, false)
            .expect("consistent");
        rpl.merge(&mut asg, &mut cdb, lit(1), lit(4), true, false)
            .expect("consistent");
        stamp.update_dominators(&rpl);
        assert_eq!(stamp.dominator(lit(1)), Some(lit(-3)));
        assert_eq!(stamp.dominator(lit(-3)), Some(lit(4)));
        assert_eq!(stamp.dominator(lit(4)), None);
        stamp.handle(SolverEvent::NewVar);
        assert_eq!(stamp.dominator(lit(-5)), None);
    }
}
