//! Space types that size the inline buffer of a [`SmallAny`](crate::SmallAny).
//!
//! A value is stored inline when it is no larger than the space and its alignment
//! is no stricter than the space's alignment. Every space here is pointer aligned;
//! any other `Sized` type can be used as a space as well.

/// Space for one pointer width.
pub type S1 = [usize; 1];

/// Space for two pointer widths.
pub type S2 = [usize; 2];

/// Space for four pointer widths. This is the default space.
pub type S4 = [usize; 4];

/// Space for eight pointer widths.
pub type S8 = [usize; 8];

/// Space for sixteen pointer widths.
pub type S16 = [usize; 16];

/// Space for thirty-two pointer widths.
pub type S32 = [usize; 32];

/// Space for sixty-four pointer widths.
pub type S64 = [usize; 64];
