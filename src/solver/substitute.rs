//! Equivalence API on `Solver`
use {
    super::Solver,
    crate::{
        assign::{AssignIF, PropagateIF, Removed, VarManipulateIF},
        replacer::ReplaceIF,
        types::*,
    },
};

/// API for equivalent literal substitution like [`merge`](`crate::solver::SubstituteIF::merge`), [`apply_all`](`crate::solver::SubstituteIF::apply_all`) and so on.
/// Every method returns `Err(SolverError::Inconsistent)` once a contradiction was found.
pub trait SubstituteIF {
    /// assert `lit1 == lit2`, or `lit1 == !lit2` if `equal` is `false`.
    ///
    /// # Errors
    ///
    /// if the solver becomes inconsistent.
    fn merge(&mut self, lit1: Lit, lit2: Lit, equal: bool, add_later: bool) -> MaybeInconsistent;
    /// rewrite the formula and the assumptions with all equivalences found so far.
    ///
    /// # Errors
    ///
    /// if the solver becomes inconsistent.
    fn apply_all(&mut self) -> MaybeInconsistent;
    /// return `Ok(true)` if `vi == lit` is already known.
    ///
    /// # Errors
    ///
    /// if `vi == !lit` is known.
    fn already_in(&mut self, vi: VarId, lit: Lit) -> Result<bool, SolverError>;
    /// add the equivalences merged with `add_later` as binary clauses.
    ///
    /// # Errors
    ///
    /// if the solver becomes inconsistent.
    fn materialize_deferred_equality_clauses(&mut self) -> MaybeInconsistent;
    /// replace the assumptions.
    ///
    /// # Errors
    ///
    /// `SolverError::OutOfRange` if a literal is out of range for var index.
    fn set_assumptions(&mut self, lits: &[i32]) -> MaybeInconsistent;
    /// return `false` if a contradiction was found.
    fn is_ok(&self) -> bool;
    /// return the current root level assignment with replaced vars filled.
    fn extended_model(&self) -> Vec<Option<bool>>;
}

impl SubstituteIF for Solver {
    fn merge(&mut self, lit1: Lit, lit2: Lit, equal: bool, add_later: bool) -> MaybeInconsistent {
        self.check_ok()?;
        for l in [lit1, lit2] {
            self.check_range(i32::from(l))?;
        }
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut rpl,
            ..
        } = self;
        // a var replaced by a previous round stands for its representative
        let current = |l: Lit| {
            if asg.removed(l.vi()) == Removed::Replaced {
                rpl.resolve(l)
            } else {
                l
            }
        };
        let (l1, l2) = (current(lit1), current(lit2));
        let result = rpl.merge(asg, cdb, l1, l2, equal, add_later);
        self.guard(result)
    }
    fn apply_all(&mut self) -> MaybeInconsistent {
        self.check_ok()?;
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut rpl,
            ref mut stamp,
            ref mut assumptions,
            ..
        } = self;
        let result = asg
            .propagate(cdb)
            .map_err(SolverError::RootLevelConflict)
            .and_then(|_| rpl.perform_replace(asg, cdb, assumptions, stamp));
        self.guard(result)
    }
    fn already_in(&mut self, vi: VarId, lit: Lit) -> Result<bool, SolverError> {
        self.check_ok()?;
        let result = self.rpl.already_in(vi, lit);
        self.guard(result)
    }
    fn materialize_deferred_equality_clauses(&mut self) -> MaybeInconsistent {
        self.check_ok()?;
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut rpl,
            ..
        } = self;
        let result = rpl.materialize_deferred(asg, cdb);
        self.guard(result)
    }
    fn set_assumptions(&mut self, lits: &[i32]) -> MaybeInconsistent {
        self.check_ok()?;
        for i in lits.iter() {
            self.check_range(*i)?;
        }
        for a in std::mem::take(&mut self.assumptions) {
            self.asg.var_mut(a.vi()).turn_off(FlagVar::ASSUMED);
        }
        for i in lits.iter() {
            let mut l = Lit::from(*i);
            if self.asg.removed(l.vi()) == Removed::Replaced {
                l = self.rpl.resolve(l);
            }
            self.asg.var_mut(l.vi()).turn_on(FlagVar::ASSUMED);
            self.assumptions.push(l);
        }
        Ok(())
    }
    fn is_ok(&self) -> bool {
        self.ok
    }
    fn extended_model(&self) -> Vec<Option<bool>> {
        let mut model = self.asg.assign_ref();
        self.rpl.extend_model(&mut model);
        model
    }
}
