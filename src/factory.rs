//! Generic construction that keeps each argument's ownership intact.
//!
//! The argument's category lives in its type: passing `&value` selects a
//! target's borrowing constructor, passing `value` selects the one that
//! consumes it. [`create`] moves its arguments straight into the target, so
//! the only copies made are the ones the chosen constructor makes itself.

use crate::buffer::OwningBuffer;
use crate::holder::Holder;
use std::fmt;

/// A type that can be built from `Args`.
///
/// Several arguments are passed as a tuple.
pub trait Construct<Args>: Sized {
    fn construct(args: Args) -> Self;
}

pub fn create<T, Args>(args: Args) -> T
where
    T: Construct<Args>,
{
    T::construct(args)
}

impl<A, B, L, R> Construct<(A, B)> for (L, R)
where
    L: Construct<A>,
    R: Construct<B>,
{
    fn construct((a, b): (A, B)) -> Self {
        (L::construct(a), R::construct(b))
    }
}

impl<A, B, C, X, Y, Z> Construct<(A, B, C)> for (X, Y, Z)
where
    X: Construct<A>,
    Y: Construct<B>,
    Z: Construct<C>,
{
    fn construct((a, b, c): (A, B, C)) -> Self {
        (X::construct(a), Y::construct(b), Z::construct(c))
    }
}

/// Which constructor produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    Borrowed,
    Owned,
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Via::Borrowed => write!(f, "borrowed"),
            Via::Owned => write!(f, "owned"),
        }
    }
}

/// An integer wrapper with one constructor per argument category, recording
/// which of the two ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    value: i32,
    via: Via,
}

impl Probe {
    pub fn from_borrowed(value: &i32) -> Self {
        Self {
            value: *value,
            via: Via::Borrowed,
        }
    }

    pub fn from_owned(value: i32) -> Self {
        Self {
            value,
            via: Via::Owned,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn via(&self) -> Via {
        self.via
    }

    /// Signature of the constructor that built this probe.
    pub fn signature(&self) -> &'static str {
        match self.via {
            Via::Borrowed => "Probe(&i32)",
            Via::Owned => "Probe(i32)",
        }
    }
}

impl Construct<&i32> for Probe {
    fn construct(value: &i32) -> Self {
        Self::from_borrowed(value)
    }
}

impl Construct<i32> for Probe {
    fn construct(value: i32) -> Self {
        Self::from_owned(value)
    }
}

impl Construct<&[i32]> for OwningBuffer {
    fn construct(src: &[i32]) -> Self {
        Self::from_slice(src)
    }
}

impl Construct<&OwningBuffer> for OwningBuffer {
    fn construct(other: &OwningBuffer) -> Self {
        other.clone()
    }
}

impl Construct<OwningBuffer> for OwningBuffer {
    fn construct(other: OwningBuffer) -> Self {
        other
    }
}

impl Construct<&OwningBuffer> for Holder {
    fn construct(buffer: &OwningBuffer) -> Self {
        Self::from_borrowed(buffer)
    }
}

impl Construct<OwningBuffer> for Holder {
    fn construct(buffer: OwningBuffer) -> Self {
        Self::from_owned(buffer)
    }
}
