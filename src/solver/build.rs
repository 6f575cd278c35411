//! Solver Builder
use {
    super::{Solver, SolverEvent},
    crate::{replacer::ReplaceIF, types::*},
    std::convert::TryFrom,
};

/// API for solver creation and modification.
pub trait SatSolverIF: Instantiate {
    /// add an assignment to Solver.
    ///
    /// # Errors
    ///
    /// * `SolverError::Inconsistent` if it conflicts with existing assignments.
    /// * `SolverError::OutOfRange` if it is out of range for var index.
    ///
    /// # Example
    ///
    /// ```
    /// use splr_replacer::{assign::AssignIF, solver::{SatSolverIF, Solver}, types::*};
    ///
    /// let cnf: Vec<Vec<i32>> = vec![vec![-1, 2], vec![-2, 3]];
    /// let mut s = Solver::try_from((Config::default(), cnf.as_slice())).expect("consistent");
    /// assert!(s.add_assignment(1).is_ok());
    /// assert_eq!(s.asg.assign(3), Some(true));
    /// assert!(matches!(s.add_assignment(4), Err(SolverError::OutOfRange)));
    /// assert!(matches!(s.add_assignment(0), Err(SolverError::OutOfRange)));
    /// assert!(matches!(s.add_assignment(-3), Err(SolverError::Inconsistent)));
    /// ```
    fn add_assignment(&mut self, val: i32) -> Result<&mut Solver, SolverError>;
    /// add a clause to Solver.
    ///
    /// # Errors
    ///
    /// * `SolverError::EmptyClause` if it is empty or falsified.
    /// * `SolverError::Inconsistent` if it propagates to a conflict.
    /// * `SolverError::OutOfRange` if a literal in it is out of range for var index.
    ///
    /// # Example
    ///```
    /// use splr_replacer::{solver::{SatSolverIF, Solver}, types::*};
    ///
    /// let cnf = CNFDescription {
    ///     num_of_variables: 4,
    ///     ..CNFDescription::default()
    /// };
    /// let mut s = Solver::instantiate(&Config::default(), &cnf);
    /// assert!(s.add_clause(vec![1, -2]).is_ok());
    /// assert!(s.add_clause(vec![2, -3, 4]).is_ok());
    /// assert!(matches!(s.add_clause(vec![10, 1]), Err(SolverError::OutOfRange)));
    /// assert!(matches!(s.add_clause(Vec::new()), Err(SolverError::EmptyClause)));
    ///```
    fn add_clause<V>(&mut self, vec: V) -> Result<&mut Solver, SolverError>
    where
        V: AsRef<[i32]>;
    /// add a var to solver and return the number of vars.
    ///
    /// # Example
    /// ```
    /// use splr_replacer::{replacer::ReplaceIF, solver::{SatSolverIF, Solver}, types::*};
    ///
    /// let cnf: Vec<Vec<i32>> = vec![vec![1, 2]];
    /// let mut s = Solver::try_from((Config::default(), cnf.as_slice())).expect("consistent");
    /// assert_eq!(s.add_var(), 3);
    /// assert_eq!(s.rpl.resolve(Lit::from(3i32)), Lit::from(3i32));
    /// assert!(s.add_assignment(-3).is_ok());
    /// ```
    fn add_var(&mut self) -> usize;
}

/// ```
/// use splr_replacer::{solver::Solver, types::*};
///
/// let cnf: Vec<Vec<i32>> = vec![vec![1], vec![-1]];
/// assert!(Solver::try_from((Config::default(), cnf.as_slice())).is_err());
/// let cnf: Vec<Vec<i32>> = vec![vec![1, 0]];
/// assert!(matches!(
///     Solver::try_from((Config::default(), cnf.as_slice())),
///     Err(SolverError::OutOfRange)
/// ));
/// ```
impl<V> TryFrom<(Config, &[V])> for Solver
where
    V: AsRef<[i32]>,
{
    type Error = SolverError;
    fn try_from((config, vec): (Config, &[V])) -> Result<Self, Self::Error> {
        let cnf = CNFDescription::from(vec);
        let mut s = Solver::instantiate(&config, &cnf);
        for ints in vec.iter() {
            s.add_clause(ints)?;
        }
        log::debug!("built a solver for {cnf}");
        Ok(s)
    }
}

impl SatSolverIF for Solver {
    fn add_assignment(&mut self, val: i32) -> Result<&mut Solver, SolverError> {
        self.check_ok()?;
        self.check_range(val)?;
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut rpl,
            ..
        } = self;
        let result = rpl
            .add_clause_int(asg, cdb, &[Lit::from(val)], false)
            .map_err(|_| SolverError::Inconsistent);
        self.guard(result).map(|_| self)
    }
    fn add_clause<V>(&mut self, vec: V) -> Result<&mut Solver, SolverError>
    where
        V: AsRef<[i32]>,
    {
        self.check_ok()?;
        for i in vec.as_ref().iter() {
            self.check_range(*i)?;
        }
        let lits = vec
            .as_ref()
            .iter()
            .map(|i| Lit::from(*i))
            .collect::<Vec<Lit>>();
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut rpl,
            ..
        } = self;
        let result = rpl
            .add_clause_int(asg, cdb, &lits, false)
            .map_err(|e| match e {
                SolverError::RootLevelConflict(_) => SolverError::Inconsistent,
                e => e,
            });
        self.guard(result).map(|_| self)
    }
    fn add_var(&mut self) -> usize {
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut rpl,
            ref mut stamp,
            ..
        } = self;
        asg.handle(SolverEvent::NewVar);
        cdb.handle(SolverEvent::NewVar);
        rpl.handle(SolverEvent::NewVar);
        stamp.handle(SolverEvent::NewVar);
        asg.num_vars
    }
}
