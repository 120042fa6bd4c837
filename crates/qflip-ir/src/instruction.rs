//! Circuit instructions: an operation plus the bits it acts on.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// What an instruction does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    /// Unitary gate.
    Gate(StandardGate),
    /// Read `qubits[i]` into `clbits[i]`.
    Measure,
    /// Return the qubit to |0⟩.
    Reset,
    /// Scheduling fence; no effect on the state.
    Barrier,
}

impl InstructionKind {
    /// OpenQASM name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }
}

/// An operation with its operands.
///
/// Instructions are not checked on construction; [`crate::Circuit::apply`]
/// validates them against the circuit's registers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation.
    pub kind: InstructionKind,
    /// Qubit operands, in gate order (control first for `cx`/`cz`).
    pub qubits: Vec<QubitId>,
    /// Classical targets; empty unless `kind` is `Measure`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// A gate on `qubits`.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Measure each qubit into the classical bit at the same position.
    ///
    /// Fails with `MeasureArityMismatch` when the lists differ in length.
    pub fn measure(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let clbits: Vec<_> = clbits.into_iter().collect();
        if qubits.len() != clbits.len() {
            return Err(IrError::MeasureArityMismatch {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }
        Ok(Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        })
    }

    /// Reset one qubit.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// A barrier across `qubits`.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// The gate, if this is a gate instruction.
    pub fn as_gate(&self) -> Option<StandardGate> {
        match self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    pub fn is_measure(&self) -> bool {
        self.kind == InstructionKind::Measure
    }

    pub fn is_reset(&self) -> bool {
        self.kind == InstructionKind::Reset
    }

    pub fn is_barrier(&self) -> bool {
        self.kind == InstructionKind::Barrier
    }

    /// OpenQASM name of the operation.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// `(qubit, clbit)` pairs written by a measurement.
    pub fn readouts(&self) -> impl Iterator<Item = (QubitId, ClbitId)> + '_ {
        self.qubits.iter().copied().zip(self.clbits.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::gate(StandardGate::CX, [QubitId(2), QubitId(0)]);
        assert_eq!(inst.qubits, [QubitId(2), QubitId(0)]);
        assert!(inst.clbits.is_empty());
        assert_eq!(inst.name(), "cx");
        assert_eq!(inst.as_gate(), Some(StandardGate::CX));
        assert!(!inst.is_measure());
    }

    #[test]
    fn test_measure_pairs_positionally() {
        let inst = Instruction::measure([QubitId(0), QubitId(3)], [ClbitId(1), ClbitId(0)]).unwrap();
        assert!(inst.is_measure());
        assert_eq!(inst.as_gate(), None);
        assert_eq!(
            inst.readouts().collect::<Vec<_>>(),
            [(QubitId(0), ClbitId(1)), (QubitId(3), ClbitId(0))]
        );
    }

    #[test]
    fn test_measure_arity_mismatch() {
        let result = Instruction::measure([QubitId(0), QubitId(1)], [ClbitId(0)]);
        assert!(matches!(
            result,
            Err(IrError::MeasureArityMismatch {
                qubits: 2,
                clbits: 1
            })
        ));
    }

    #[test]
    fn test_reset_and_barrier() {
        let reset = Instruction::reset(QubitId(4));
        assert!(reset.is_reset());
        assert_eq!(reset.name(), "reset");

        let barrier = Instruction::barrier([QubitId(0), QubitId(1), QubitId(2)]);
        assert!(barrier.is_barrier());
        assert_eq!(barrier.qubits.len(), 3);
        assert_eq!(InstructionKind::Barrier.name(), "barrier");
    }

    #[test]
    fn test_instruction_json_shape() {
        let inst = Instruction::gate(StandardGate::X, [QubitId(1)]);
        let json = serde_json::to_value(&inst).unwrap();
        assert_eq!(json["qubits"], serde_json::json!([1]));
        assert!(json.get("clbits").is_none());

        let back: Instruction = serde_json::from_value(json).unwrap();
        assert_eq!(back, inst);
    }
}
