/// Heap struct for selecting decision vars
use {
    super::{AssignStack, VarManipulateIF},
    crate::types::*,
    std::fmt,
};

/// Heap of VarId, based on var activity.
// # Note
// - both fields has a fixed length. Don't use push and pop.
// - `idxs[0]` contains the number of alive elements
//   `indx` is positions. So the unused field 0 can hold the last position as a special case.
#[derive(Clone, Debug, Default)]
pub struct VarIdHeap {
    /// order : usize -> VarId::from, -- Which var is the n-th best?
    pub(crate) heap: Vec<VarId>,
    /// VarId : -> order : usize::from -- How good is the var?
    /// `idxs[0]` holds the number of alive elements
    pub(crate) idxs: Vec<usize>,
}

impl fmt::Display for VarIdHeap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            " - seek pointer - nth -> var: {:?}\n - var -> nth: {:?}",
            self.heap, self.idxs,
        )
    }
}

impl VarIdHeap {
    pub fn new(n: usize, init: usize) -> VarIdHeap {
        let mut heap = Vec::with_capacity(n + 1);
        let mut idxs = Vec::with_capacity(n + 1);
        heap.push(0);
        idxs.push(n);
        for i in 1..=n {
            heap.push(i);
            idxs.push(i);
        }
        idxs[0] = init;
        VarIdHeap { heap, idxs }
    }
    pub fn contains(&self, v: VarId) -> bool {
        self.idxs[v] <= self.idxs[0]
    }
    pub fn len(&self) -> usize {
        self.idxs[0]
    }
    pub fn is_empty(&self) -> bool {
        self.idxs[0] == 0
    }
}

/// Internal heap manipulation
trait VarHeapIF {
    fn percolate_up(&mut self, start: usize);
    fn percolate_down(&mut self, start: usize);
    fn insert_heap(&mut self, vi: VarId);
    fn remove_from_heap(&mut self, vs: VarId);
    fn get_heap_root(&mut self) -> VarId;
}

/// API for decision var management.
pub trait VarSelectIF {
    /// return `true` if var `vi` is a candidate of decision.
    fn is_decision_var(&self, vi: VarId) -> bool;
    /// make var `vi` a candidate of decision.
    fn set_decision_var(&mut self, vi: VarId);
    /// exclude var `vi` from decision.
    fn unset_decision_var(&mut self, vi: VarId);
    /// add the activity of var `from` to var `to`.
    fn transfer_activity(&mut self, from: VarId, to: VarId);
    /// reorder the heap after an activity change of var `vi`.
    fn update_heap(&mut self, vi: VarId);
    /// pop the best unassigned decision var and return its literal with the saved phase.
    fn select_decision_literal(&mut self) -> Option<Lit>;
}

impl AssignStack {
    /// register a new var `vi` as the last element and insert it into the heap.
    pub(super) fn expand_heap(&mut self, vi: VarId) {
        if self.var_order.heap.is_empty() {
            self.var_order = VarIdHeap::new(0, 0);
        }
        debug_assert_eq!(self.var_order.heap.len(), vi);
        self.var_order.heap.push(vi);
        self.var_order.idxs.push(vi);
        self.insert_heap(vi);
    }
    /// put var `vi` back into the heap if it can be a decision var.
    pub(super) fn restore_heap(&mut self, vi: VarId) {
        if self.var[vi].is(FlagVar::DECISION) {
            self.insert_heap(vi);
        }
    }
}

impl VarSelectIF for AssignStack {
    fn is_decision_var(&self, vi: VarId) -> bool {
        self.var[vi].is(FlagVar::DECISION)
    }
    fn set_decision_var(&mut self, vi: VarId) {
        debug_assert!(0 < vi);
        self.var[vi].turn_on(FlagVar::DECISION);
        if self.var[vi].assign.is_none() {
            self.insert_heap(vi);
        }
    }
    fn unset_decision_var(&mut self, vi: VarId) {
        self.var[vi].turn_off(FlagVar::DECISION);
        self.remove_from_heap(vi);
    }
    fn transfer_activity(&mut self, from: VarId, to: VarId) {
        let a = self.var(from).activity;
        self.var_mut(to).activity += a;
    }
    fn update_heap(&mut self, vi: VarId) {
        debug_assert!(vi != 0, "Invalid VarId");
        if self.var_order.contains(vi) {
            let start = self.var_order.idxs[vi];
            self.percolate_up(start);
        }
    }
    fn select_decision_literal(&mut self) -> Option<Lit> {
        while !self.var_order.is_empty() {
            let vi = self.get_heap_root();
            let v = &self.var[vi];
            if v.assign.is_none() && v.is(FlagVar::DECISION) {
                return Some(Lit::from((vi, v.is(FlagVar::PHASE))));
            }
        }
        None
    }
}

impl VarHeapIF for AssignStack {
    fn insert_heap(&mut self, vi: VarId) {
        if self.var_order.contains(vi) {
            let i = self.var_order.idxs[vi];
            self.percolate_up(i);
            return;
        }
        let i = self.var_order.idxs[vi];
        let n = self.var_order.idxs[0] + 1;
        let vn = self.var_order.heap[n];
        self.var_order.heap.swap(i, n);
        self.var_order.idxs.swap(vi, vn);
        self.var_order.idxs[0] = n;
        self.percolate_up(n);
    }
    fn remove_from_heap(&mut self, vs: VarId) {
        let s = self.var_order.idxs[vs];
        let n = self.var_order.idxs[0];
        if n < s {
            return;
        }
        let vn = self.var_order.heap[n];
        self.var_order.heap.swap(n, s);
        self.var_order.idxs.swap(vn, vs);
        self.var_order.idxs[0] -= 1;
        if s < n {
            self.percolate_down(s);
            let p = self.var_order.idxs[vn];
            self.percolate_up(p);
        }
    }
    fn get_heap_root(&mut self) -> VarId {
        let s = 1;
        let vs = self.var_order.heap[s];
        let n = self.var_order.idxs[0];
        let vn = self.var_order.heap[n];
        debug_assert!(vn != 0, "Invalid VarId for heap");
        debug_assert!(vs != 0, "Invalid VarId for heap");
        self.var_order.heap.swap(n, s);
        self.var_order.idxs.swap(vn, vs);
        self.var_order.idxs[0] -= 1;
        if 1 < self.var_order.idxs[0] {
            self.percolate_down(1);
        }
        vs
    }
    fn percolate_up(&mut self, start: usize) {
        let mut q = start;
        let vq = self.var_order.heap[q];
        debug_assert!(0 < vq, "size of heap is too small");
        let aq = self.var[vq].activity;
        loop {
            let p = q / 2;
            if p == 0 {
                self.var_order.heap[q] = vq;
                self.var_order.idxs[vq] = q;
                return;
            } else {
                let vp = self.var_order.heap[p];
                let ap = self.var[vp].activity;
                if ap < aq {
                    // move down the current parent, and make it empty
                    self.var_order.heap[q] = vp;
                    self.var_order.idxs[vp] = q;
                    q = p;
                } else {
                    self.var_order.heap[q] = vq;
                    self.var_order.idxs[vq] = q;
                    return;
                }
            }
        }
    }
    fn percolate_down(&mut self, start: usize) {
        let n = self.var_order.len();
        let mut i = start;
        let vi = self.var_order.heap[i];
        let ai = self.var[vi].activity;
        loop {
            let l = 2 * i; // left
            if l <= n {
                let vl = self.var_order.heap[l];
                let al = self.var[vl].activity;
                let r = l + 1; // right
                let (target, vc, ac) =
                    if r <= n && al < self.var[self.var_order.heap[r]].activity {
                        let vr = self.var_order.heap[r];
                        (r, vr, self.var[vr].activity)
                    } else {
                        (l, vl, al)
                    };
                if ai < ac {
                    self.var_order.heap[i] = vc;
                    self.var_order.idxs[vc] = i;
                    i = target;
                } else {
                    self.var_order.heap[i] = vi;
                    self.var_order.idxs[vi] = i;
                    return;
                }
            } else {
                self.var_order.heap[i] = vi;
                self.var_order.idxs[vi] = i;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(n: usize) -> AssignStack {
        let cnf = CNFDescription {
            num_of_variables: n,
            ..CNFDescription::default()
        };
        AssignStack::instantiate(&Config::default(), &cnf)
    }

    #[test]
    fn test_select_by_activity() {
        let mut asg = setup(4);
        for (vi, a) in [(1, 3.0), (2, 7.0), (3, 10.0), (4, 1.0)] {
            asg.var[vi].activity = a;
            asg.update_heap(vi);
        }
        assert_eq!(asg.select_decision_literal().map(|l| l.vi()), Some(3));
        assert_eq!(asg.select_decision_literal().map(|l| l.vi()), Some(2));
        assert_eq!(asg.select_decision_literal().map(|l| l.vi()), Some(1));
        assert_eq!(asg.select_decision_literal().map(|l| l.vi()), Some(4));
        assert_eq!(asg.select_decision_literal(), None);
    }
    #[test]
    fn test_unset_decision_var() {
        let mut asg = setup(3);
        asg.var[2].activity = 5.0;
        asg.update_heap(2);
        asg.unset_decision_var(2);
        assert!(!asg.is_decision_var(2));
        assert!(!asg.var_order.contains(2));
        asg.transfer_activity(2, 3);
        asg.update_heap(3);
        assert_eq!(asg.select_decision_literal().map(|l| l.vi()), Some(3));
        asg.set_decision_var(2);
        assert_eq!(asg.select_decision_literal().map(|l| l.vi()), Some(2));
        assert_eq!(asg.select_decision_literal().map(|l| l.vi()), Some(1));
        assert_eq!(asg.select_decision_literal(), None);
    }
    #[test]
    fn test_new_var_joins_heap() {
        let mut asg = setup(1);
        asg.handle(SolverEvent::NewVar);
        assert_eq!(asg.num_vars, 2);
        assert!(asg.var_order.contains(2));
        assert_eq!(asg.var_order.len(), 2);
    }
}
