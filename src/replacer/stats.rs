use std::{fmt, ops::AddAssign, time::Duration};

/// Counters of a substitution round. `global_stats` is the sum of all rounds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub num_calls: usize,
    /// literal occurrences rewritten
    pub replaced_lits: usize,
    pub removed_bin_clauses: usize,
    pub removed_tri_clauses: usize,
    pub removed_long_clauses: usize,
    /// literals dropped from long clauses
    pub removed_long_lits: usize,
    /// vars assigned at level zero during the round
    pub zero_depth_assigns: usize,
    /// vars merged since the previous round
    pub actually_replaced_vars: usize,
    pub elapsed: Duration,
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Stats) {
        self.num_calls += other.num_calls;
        self.replaced_lits += other.replaced_lits;
        self.removed_bin_clauses += other.removed_bin_clauses;
        self.removed_tri_clauses += other.removed_tri_clauses;
        self.removed_long_clauses += other.removed_long_clauses;
        self.removed_long_lits += other.removed_long_lits;
        self.zero_depth_assigns += other.zero_depth_assigns;
        self.actually_replaced_vars += other.actually_replaced_vars;
        self.elapsed += other.elapsed;
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RPL:: calls: {}, vars: {}, lits: {}, bin: {}, tri: {}, long: {} (lits {}), units: {}, time: {:.3}s",
            self.num_calls,
            self.actually_replaced_vars,
            self.replaced_lits,
            self.removed_bin_clauses,
            self.removed_tri_clauses,
            self.removed_long_clauses,
            self.removed_long_lits,
            self.zero_depth_assigns,
            self.elapsed.as_secs_f64(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulation() {
        let mut global = Stats::default();
        let run = Stats {
            num_calls: 1,
            replaced_lits: 4,
            removed_bin_clauses: 2,
            elapsed: Duration::from_millis(5),
            ..Stats::default()
        };
        global += run.clone();
        global += run;
        assert_eq!(global.num_calls, 2);
        assert_eq!(global.replaced_lits, 8);
        assert_eq!(global.removed_bin_clauses, 4);
        assert_eq!(global.elapsed, Duration::from_millis(10));
        assert!(global.to_string().starts_with("RPL:: calls: 2,"));
    }
}
