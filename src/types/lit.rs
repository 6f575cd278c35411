use std::{
    fmt,
    num::NonZeroU32,
    ops::{Index, IndexMut, Not},
};

/// Var index
pub type VarId = usize;

/// Literal encoded on `u32` as:
///
/// - the Literal corresponding to a positive occurrence of *variable `n` is `2 * n + 1` and
/// - that for the negative one is `2 * n`.
///
/// So a literal and its negation are adjacent in the natural order.
///
/// # Examples
///
/// ```
/// use splr_replacer::types::*;
/// assert_eq!(2usize, Lit::from(-1i32).into());
/// assert_eq!(3usize, Lit::from( 1i32).into());
/// assert_eq!(4usize, Lit::from(-2i32).into());
/// assert_eq!(5usize, Lit::from( 2i32).into());
/// assert_eq!( 1i32, Lit::from( 1i32).into());
/// assert_eq!(-1i32, Lit::from(-1i32).into());
/// assert_eq!( 2i32, Lit::from( 2i32).into());
/// assert_eq!(-2i32, Lit::from(-2i32).into());
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Lit {
    /// literal encoded into folded u32
    ordinal: NonZeroU32,
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L", i32::from(self))
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L", i32::from(self))
    }
}

/// convert literals to `[i32]` (for debug).
pub fn i32s(v: &[Lit]) -> Vec<i32> {
    v.iter().map(|l| i32::from(*l)).collect::<Vec<_>>()
}

impl From<(VarId, bool)> for Lit {
    /// make a literal from a var and its polarity (`true` for positive).
    #[inline]
    fn from((vi, positive): (VarId, bool)) -> Self {
        Lit {
            ordinal: NonZeroU32::new(((vi as u32) << 1) + (positive as u32))
                .expect("the null literal is unrepresentable"),
        }
    }
}

impl From<usize> for Lit {
    #[inline]
    fn from(l: usize) -> Self {
        Lit {
            ordinal: NonZeroU32::new(l as u32).expect("the null literal is unrepresentable"),
        }
    }
}

impl From<i32> for Lit {
    #[inline]
    fn from(x: i32) -> Self {
        debug_assert!(x != 0);
        Lit {
            ordinal: NonZeroU32::new((if x < 0 { -2 * x } else { 2 * x + 1 }) as u32)
                .expect("the null literal is unrepresentable"),
        }
    }
}

impl From<Lit> for bool {
    /// - positive Lit (= odd u32) => true
    /// - negative Lit (= even u32) => false
    #[inline]
    fn from(l: Lit) -> bool {
        (l.ordinal.get() & 1) != 0
    }
}

impl From<Lit> for usize {
    #[inline]
    fn from(l: Lit) -> usize {
        l.ordinal.get() as usize
    }
}

impl From<Lit> for i32 {
    #[inline]
    fn from(l: Lit) -> i32 {
        i32::from(&l)
    }
}

impl From<&Lit> for i32 {
    #[inline]
    fn from(l: &Lit) -> i32 {
        if l.ordinal.get() % 2 == 0 {
            -((l.ordinal.get() >> 1) as i32)
        } else {
            (l.ordinal.get() >> 1) as i32
        }
    }
}

impl Not for Lit {
    type Output = Lit;
    #[inline]
    fn not(self) -> Self {
        Lit {
            ordinal: NonZeroU32::new(self.ordinal.get() ^ 1)
                .expect("the null literal is unrepresentable"),
        }
    }
}

impl Lit {
    /// convert to `VarId`.
    #[inline]
    pub fn vi(self) -> VarId {
        (self.ordinal.get() >> 1) as VarId
    }
    /// return the positive literal of var `vi`.
    #[inline]
    pub fn positive(vi: VarId) -> Lit {
        Lit::from((vi, true))
    }
    /// flip the polarity if `b` holds.
    ///
    /// ```
    /// use splr_replacer::types::*;
    /// assert_eq!(Lit::from(3i32).negate_if(false), Lit::from(3i32));
    /// assert_eq!(Lit::from(3i32).negate_if(true), Lit::from(-3i32));
    /// ```
    #[inline]
    pub fn negate_if(self, b: bool) -> Lit {
        if b {
            !self
        } else {
            self
        }
    }
}

impl Index<Lit> for [bool] {
    type Output = bool;
    #[inline]
    fn index(&self, l: Lit) -> &Self::Output {
        &self[usize::from(l)]
    }
}

impl IndexMut<Lit> for [bool] {
    #[inline]
    fn index_mut(&mut self, l: Lit) -> &mut Self::Output {
        &mut self[usize::from(l)]
    }
}

impl Index<Lit> for Vec<bool> {
    type Output = bool;
    #[inline]
    fn index(&self, l: Lit) -> &Self::Output {
        &self[usize::from(l)]
    }
}

impl IndexMut<Lit> for Vec<bool> {
    #[inline]
    fn index_mut(&mut self, l: Lit) -> &mut Self::Output {
        &mut self[usize::from(l)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_conversion() {
        assert_eq!(Lit::from(1i32), Lit::from((1 as VarId, true)));
        assert_eq!(Lit::from(-2i32), Lit::from((2 as VarId, false)));
        assert_eq!(Lit::from(7i32).vi(), 7);
        assert_eq!(Lit::from(-7i32).vi(), 7);
        assert!(bool::from(Lit::from(4i32)));
        assert!(!bool::from(Lit::from(-4i32)));
        assert_eq!(!Lit::from(5i32), Lit::from(-5i32));
        assert_eq!(i32s(&[Lit::from(3i32), Lit::from(-1i32)]), vec![3, -1]);
    }
    #[test]
    fn test_lit_order() {
        // a literal and its negation are neighbors
        assert!(Lit::from(-3i32) < Lit::from(3i32));
        assert!(Lit::from(3i32) < Lit::from(-4i32));
        assert_eq!(usize::from(Lit::from(3i32)) ^ 1, usize::from(Lit::from(-3i32)));
    }
}
