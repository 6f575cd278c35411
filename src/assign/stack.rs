/// main struct AssignStack
use {
    super::{AssignIF, AssignReason, Var, VarIdHeap},
    crate::types::*,
    std::fmt,
};

/// Assignments made at decision level zero and the var heap.
#[derive(Clone, Debug, Default)]
pub struct AssignStack {
    /// vars
    pub(crate) var: Vec<Var>,
    /// record of assignment
    pub(crate) trail: Vec<Lit>,
    pub(crate) trail_lim: Vec<usize>,
    /// the-number-of-assigned-and-propagated-vars + 1
    pub(crate) q_head: usize,
    /// decision var heap
    pub(crate) var_order: VarIdHeap,

    //
    //## Statistics
    //
    /// the number of vars.
    pub num_vars: usize,
    /// the number of asserted vars.
    pub num_asserted_vars: usize,
    pub(crate) num_decision: usize,
    pub(crate) num_propagation: usize,
}

impl Instantiate for AssignStack {
    fn instantiate(_config: &Config, cnf: &CNFDescription) -> AssignStack {
        let nv = cnf.num_of_variables;
        AssignStack {
            var: Var::new_vars(nv),
            trail: Vec::with_capacity(nv),
            var_order: VarIdHeap::new(nv, nv),
            num_vars: nv,
            ..AssignStack::default()
        }
    }
    #[inline]
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::NewVar => {
                self.num_vars += 1;
                self.var.push(Var::default());
                self.expand_heap(self.num_vars);
            }
        }
    }
}

impl AssignIF for AssignStack {
    #[inline]
    fn num_vars(&self) -> usize {
        self.num_vars
    }
    #[inline]
    fn assign(&self, vi: VarId) -> Option<bool> {
        self.var[vi].assign
    }
    #[inline]
    fn assigned(&self, l: Lit) -> Option<bool> {
        match self.var[l.vi()].assign {
            Some(x) if !bool::from(l) => Some(!x),
            x => x,
        }
    }
    #[inline]
    fn level(&self, vi: VarId) -> DecisionLevel {
        self.var[vi].level
    }
    #[inline]
    fn reason(&self, vi: VarId) -> AssignReason {
        self.var[vi].reason
    }
    fn decision_level(&self) -> DecisionLevel {
        self.trail_lim.len() as DecisionLevel
    }
    fn stack(&self, i: usize) -> Lit {
        self.trail[i]
    }
    fn stack_len(&self) -> usize {
        self.trail.len()
    }
    fn remains(&self) -> bool {
        self.q_head < self.trail.len()
    }
    fn assign_ref(&self) -> Vec<Option<bool>> {
        self.var.iter().map(|v| v.assign).collect::<Vec<_>>()
    }
}

impl fmt::Display for AssignStack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let v = self.trail.iter().map(|l| i32::from(*l)).collect::<Vec<_>>();
        write!(
            f,
            "ASG:: trail({}):{:?}\n      level: {}, asserted: {}",
            self.trail.len(),
            &v,
            self.decision_level(),
            self.num_asserted_vars,
        )
    }
}
