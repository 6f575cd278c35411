use std::fmt;

/// The size of a formula given to the solver.
/// Every component reserves its per-var and per-clause storage from this.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CNFDescription {
    pub num_of_variables: usize,
    pub num_of_clauses: usize,
}

impl fmt::Display for CNFDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CNF(vars: {}, clauses: {})",
            self.num_of_variables, self.num_of_clauses
        )
    }
}

/// The largest var index referred in `vec` becomes the number of vars.
/// A literal `0` doesn't count; `add_clause` rejects it later.
impl<V: AsRef<[i32]>> From<&[V]> for CNFDescription {
    fn from(vec: &[V]) -> Self {
        let num_of_variables = vec
            .iter()
            .flat_map(|clause| clause.as_ref().iter())
            .map(|l| l.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        CNFDescription {
            num_of_variables,
            num_of_clauses: vec.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_from_vec() {
        let cnf: Vec<Vec<i32>> = vec![vec![1, -7], vec![], vec![3, 2, -4]];
        let desc = CNFDescription::from(cnf.as_slice());
        assert_eq!(desc.num_of_variables, 7);
        assert_eq!(desc.num_of_clauses, 3);
        assert_eq!(format!("{desc}"), "CNF(vars: 7, clauses: 3)");
        let empty: Vec<Vec<i32>> = Vec::new();
        assert_eq!(
            CNFDescription::from(empty.as_slice()),
            CNFDescription::default()
        );
    }
}
