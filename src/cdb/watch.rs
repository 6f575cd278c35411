use {
    super::ClauseId,
    crate::types::*,
    std::{
        fmt,
        ops::{Index, IndexMut},
    },
};

/// 'Watch literal' structure.
/// A watch is stored in the list of a literal *occurring* in the clause.
/// So `propagate` scans the list of the negation of an assigned literal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Watch {
    /// a binary clause made of the owner literal and `other`
    Binary { other: Lit, learnt: bool },
    /// a ternary clause; `others` are kept in ascending order
    Ternary { others: [Lit; 2], learnt: bool },
    /// a long clause with a cached literal of it
    Long { cid: ClauseId, blocker: Lit },
}

impl fmt::Display for Watch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Watch::Binary { other, learnt } => {
                write!(f, "W(bin: {other}{})", if *learnt { ", learnt" } else { "" })
            }
            Watch::Ternary {
                others: [a, b],
                learnt,
            } => write!(
                f,
                "W(tri: {a}, {b}{})",
                if *learnt { ", learnt" } else { "" }
            ),
            Watch::Long { cid, blocker } => write!(f, "W({cid}, blocker: {blocker})"),
        }
    }
}

impl Watch {
    /// make a ternary watch with sorted partners.
    pub fn ternary(a: Lit, b: Lit, learnt: bool) -> Watch {
        Watch::Ternary {
            others: if a < b { [a, b] } else { [b, a] },
            learnt,
        }
    }
    pub fn is_learnt(&self) -> bool {
        match self {
            Watch::Binary { learnt, .. } | Watch::Ternary { learnt, .. } => *learnt,
            Watch::Long { .. } => false,
        }
    }
    /// return `true` if this is a watch for the long clause `cid`.
    pub fn refers(&self, cid: ClauseId) -> bool {
        matches!(self, Watch::Long { cid: c, .. } if *c == cid)
    }
}

impl Index<Lit> for Vec<Vec<Watch>> {
    type Output = Vec<Watch>;
    #[inline]
    fn index(&self, l: Lit) -> &Self::Output {
        &self[usize::from(l)]
    }
}

impl IndexMut<Lit> for Vec<Vec<Watch>> {
    #[inline]
    fn index_mut(&mut self, l: Lit) -> &mut Self::Output {
        &mut self[usize::from(l)]
    }
}
