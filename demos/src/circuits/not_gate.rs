//! NOT gate circuit generator.
//!
//! Flips qubits 0 and 1 from |0⟩ to |1⟩ and reads both out, so every shot
//! observes `1` on classical bits 0 and 1.

use qflip_ir::{Circuit, ClbitId, IrResult, QubitId};

/// Generate the NOT gate circuit.
///
/// # Arguments
/// * `qubits` - Size of the quantum register
/// * `classical_bits` - Size of the classical register
///
/// # Errors
/// `QubitNotFound` if `qubits < 2`, `ClbitNotFound` if `classical_bits < 2`.
pub fn not_gate_circuit(qubits: u32, classical_bits: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("not_gate", qubits, classical_bits);

    circuit
        .x(QubitId(0))?
        .x(QubitId(1))?
        .measure(QubitId(0), ClbitId(0))?
        .measure(QubitId(1), ClbitId(1))?;

    Ok(circuit)
}
