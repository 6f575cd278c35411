use {
    super::Replacer,
    crate::{
        assign::{AssignIF, VarManipulateIF},
        types::*,
    },
};

impl Replacer {
    /// # Panics
    ///
    /// if a var alive in an equivalence class disagrees with its representative.
    pub(super) fn check_unset_sanity<A>(&self, asg: &A)
    where
        A: AssignIF + VarManipulateIF,
    {
        for vi in 1..self.table.len() {
            let rep = self.table[vi];
            if rep.vi() == vi
                || !asg.removed(vi).is_replaceable()
                || !asg.removed(rep.vi()).is_replaceable()
            {
                continue;
            }
            let val = asg.assigned(Lit::positive(vi));
            let rep_val = asg.assigned(rep);
            if val != rep_val {
                panic!(
                    "var {vi} ({}) is {val:?} but its representative {rep} ({}) is {rep_val:?}",
                    asg.removed(vi),
                    asg.removed(rep.vi()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            assign::{AssignStack, PropagateIF},
            cdb::ClauseDB,
            replacer::ReplaceIF,
        },
    };

    fn setup() -> (AssignStack, ClauseDB, Replacer) {
        let cnf = CNFDescription {
            num_of_variables: 2,
            ..CNFDescription::default()
        };
        let config = Config::default();
        let mut asg = AssignStack::instantiate(&config, &cnf);
        let mut cdb = ClauseDB::instantiate(&config, &cnf);
        let mut rpl = Replacer::instantiate(&config, &cnf);
        rpl.merge(&mut asg, &mut cdb, Lit::from(1i32), Lit::from(-2i32), true, false)
            .expect("consistent");
        (asg, cdb, rpl)
    }

    #[test]
    fn test_sane_assignment() {
        let (mut asg, _, rpl) = setup();
        rpl.check_unset_sanity(&asg);
        asg.assign_at_root_level(Lit::from(1i32)).expect("fresh");
        asg.assign_at_root_level(Lit::from(-2i32)).expect("fresh");
        rpl.check_unset_sanity(&asg);
    }
    #[test]
    #[should_panic]
    fn test_insane_assignment() {
        let (mut asg, _, rpl) = setup();
        asg.assign_at_root_level(Lit::from(1i32)).expect("fresh");
        rpl.check_unset_sanity(&asg);
    }
}
