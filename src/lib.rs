//! This is an equivalent literal substitution engine for CDCL SAT solvers in Rust.
//!
//! Equivalences between literals are merged into a substitution table,
//! then every clause, watcher list and assumption is rewritten with it.
//!
//! # Example
//!
//! ```
//! use splr_replacer::{replacer::ReplaceIF, solver::{SatSolverIF, Solver, SubstituteIF}, types::*};
//!
//! let cnf: Vec<Vec<i32>> = vec![vec![1, 2, 3], vec![-1, 4], vec![2, -3, 4]];
//! let mut s = Solver::try_from((Config::default(), cnf.as_slice())).expect("consistent");
//! s.merge(Lit::from(1i32), Lit::from(2i32), true, false).expect("consistent");
//! s.merge(Lit::from(2i32), Lit::from(3i32), true, false).expect("consistent");
//! s.apply_all().expect("consistent");
//! assert_eq!(s.rpl.representatives().len(), 1);
//! assert_eq!(s.rpl.resolve(Lit::from(-3i32)), !s.rpl.resolve(Lit::from(1i32)));
//! ```
/// Boolean constraint propagation and decision var management
pub mod assign;
/// Clause container
pub mod cdb;
/// Solver configuration
pub mod config;
/// Equivalent literal substitution
pub mod replacer;
/// struct Solver
pub mod solver;
/// Plumping layer.
pub mod types;
