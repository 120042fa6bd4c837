//! Qubit and classical bit addressing.
//!
//! Bits are addressed by their position in the circuit (`QubitId(3)` is the
//! fourth qubit). A [`Register`] names a contiguous run of those positions,
//! the way `qreg q[4];` does in OpenQASM.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Position of a qubit in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The position as a `usize`, for indexing amplitudes and tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Position of a classical bit in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// The position as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A named block of consecutive bit positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Register name, e.g. `q` or `c`.
    pub name: String,
    /// Position of the register's first bit in the circuit.
    pub offset: u32,
    /// Number of bits.
    pub size: u32,
}

impl Register {
    /// Create a register covering `offset..offset + size`.
    pub fn new(name: impl Into<String>, offset: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
        }
    }

    /// Circuit positions covered by this register.
    pub fn positions(&self) -> Range<u32> {
        self.offset..self.offset + self.size
    }
}
