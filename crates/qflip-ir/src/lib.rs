//! qflip Circuit Intermediate Representation
//!
//! This crate provides the data structures for describing quantum circuits
//! in qflip: register addressing, the standard gate set, instructions, and
//! the [`Circuit`] builder that validates every operation as it is appended.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   bits, [`Register`] for naming runs of them
//! - **Gates**: [`StandardGate`] for the built-in gates (X, H, CX, ...)
//! - **Instructions**: [`Instruction`] combining an operation with its operands
//! - **Circuit**: [`Circuit`], an ordered instruction list with a fluent builder API
//!
//! # Example: Inverting Two Qubits
//!
//! ```rust
//! use qflip_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("not_gate", 2, 2);
//!
//! circuit
//!     .x(QubitId(0)).unwrap()
//!     .x(QubitId(1)).unwrap()
//!     .measure(QubitId(0), ClbitId(0)).unwrap()
//!     .measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_ops(), 4);
//! assert_eq!(circuit.depth(), 2); // parallel X, parallel measures
//! ```
//!
//! # Example: Out-of-Range Operands
//!
//! Operands are checked against the registers at build time, so addressing a
//! wire that was never allocated fails immediately:
//!
//! ```rust
//! use qflip_ir::{Circuit, IrError, QubitId};
//!
//! let mut circuit = Circuit::with_size("too_small", 1, 1);
//! let err = circuit.x(QubitId(1)).unwrap_err();
//! assert!(matches!(err, IrError::QubitNotFound { .. }));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId, Register};
