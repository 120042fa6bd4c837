//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index is outside the quantum register.
    #[error("Qubit {qubit} out of range for {num_qubits}-qubit register{}", format_op_context(.op_name))]
    QubitNotFound {
        /// The qubit that was addressed.
        qubit: QubitId,
        /// Size of the quantum register.
        num_qubits: usize,
        /// Name of the operation, for context.
        op_name: Option<String>,
    },

    /// Classical bit index is outside the classical register.
    #[error("Classical bit {clbit} out of range for {num_clbits}-bit register{}", format_op_context(.op_name))]
    ClbitNotFound {
        /// The classical bit that was addressed.
        clbit: ClbitId,
        /// Size of the classical register.
        num_clbits: usize,
        /// Name of the operation, for context.
        op_name: Option<String>,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Measurement operand lists differ in length.
    #[error("Measure: qubit count ({qubits}) does not match clbit count ({clbits})")]
    MeasureArityMismatch {
        /// Number of qubit operands.
        qubits: usize,
        /// Number of classical bit operands.
        clbits: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_op_context(.op_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the operation, for context.
        op_name: Option<String>,
    },
}

#[allow(clippy::ref_option)]
fn format_op_context(op_name: &Option<String>) -> String {
    match op_name {
        Some(name) => format!(" (op: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
