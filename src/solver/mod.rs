/// Module `solver` provides the top-level API around the substitution engine.
/// API to instantiate
mod build;
/// per-literal dominators
mod stamp;
/// API for equivalences
mod substitute;
/// Module `validate` implements a model checker.
mod validate;

pub use self::{
    build::SatSolverIF, stamp::Stamp, substitute::SubstituteIF, validate::ValidateIF,
};

use crate::{assign::AssignStack, cdb::ClauseDB, replacer::Replacer, types::*};

/// define sub-modules' responsibilities
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverEvent {
    /// increment the number of vars.
    NewVar,
}

/// The solver object consisting of the trail, the clause store, the replacer and a stamp.
/// ```
/// use splr_replacer::{solver::{SatSolverIF, Solver, SubstituteIF}, types::*};
///
/// let cnf: Vec<Vec<i32>> = vec![vec![1, 2], vec![-1, 3], vec![-2, -3]];
/// let mut s = Solver::try_from((Config::default(), cnf.as_slice())).expect("consistent");
/// s.merge(Lit::from(1i32), Lit::from(-2i32), true, false).expect("consistent");
/// assert!(s.apply_all().is_ok());
/// assert!(s.is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    /// assignment management
    pub asg: AssignStack,
    /// clause container
    pub cdb: ClauseDB,
    /// equivalent literal substitution
    pub rpl: Replacer,
    /// dominators depending on the equivalence classes
    pub stamp: Stamp,
    /// assumptions for incremental solving
    pub assumptions: Vec<Lit>,
    /// `false` after a contradiction was found
    ok: bool,
}

impl Default for Solver {
    fn default() -> Solver {
        Solver {
            asg: AssignStack::default(),
            cdb: ClauseDB::default(),
            rpl: Replacer::default(),
            stamp: Stamp::default(),
            assumptions: Vec::new(),
            ok: true,
        }
    }
}

impl Instantiate for Solver {
    /// ```
    /// use splr_replacer::{config::Config, types::*};
    /// use splr_replacer::solver::Solver;
    /// let s = Solver::instantiate(&Config::default(), &CNFDescription::default());
    ///```
    fn instantiate(config: &Config, cnf: &CNFDescription) -> Solver {
        Solver {
            asg: AssignStack::instantiate(config, cnf),
            cdb: ClauseDB::instantiate(config, cnf),
            rpl: Replacer::instantiate(config, cnf),
            stamp: Stamp::instantiate(config, cnf),
            assumptions: Vec::new(),
            ok: true,
        }
    }
}

impl Solver {
    /// turn the flag down if `result` is a contradiction.
    fn guard<T>(&mut self, result: Result<T, SolverError>) -> Result<T, SolverError> {
        if let Err(ref e) = result {
            if self.ok {
                log::info!("the solver became inconsistent: {e}");
            }
            self.ok = false;
        }
        result
    }
    /// return `Err(Inconsistent)` if a contradiction was found before.
    fn check_ok(&self) -> MaybeInconsistent {
        if self.ok {
            Ok(())
        } else {
            Err(SolverError::Inconsistent)
        }
    }
    /// return `Err(OutOfRange)` for `0` or an undefined var.
    fn check_range(&self, i: i32) -> MaybeInconsistent {
        if i == 0 || self.asg.num_vars < i.unsigned_abs() as usize {
            return Err(SolverError::OutOfRange);
        }
        Ok(())
    }
}
