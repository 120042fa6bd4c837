//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId, Register};

/// A quantum circuit.
///
/// An ordered list of instructions over a fixed number of qubits and
/// classical bits. Every instruction is checked when it is appended, so a
/// built circuit never references a bit it does not own.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    /// Named quantum registers; bits added with `add_qubit` belong to none.
    qregs: Vec<Register>,
    /// Named classical registers.
    cregs: Vec<Register>,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_clbits: 0,
            qregs: vec![],
            cregs: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a quantum register `q` and a classical
    /// register `c` of the given sizes. Empty registers are not created.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        if num_qubits > 0 {
            circuit.add_qreg("q", num_qubits);
        }
        if num_clbits > 0 {
            circuit.add_creg("c", num_clbits);
        }
        circuit
    }

    /// Add one qubit outside any register.
    pub fn add_qubit(&mut self) -> QubitId {
        self.num_qubits += 1;
        QubitId(self.num_qubits - 1)
    }

    /// Add a quantum register and return its qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let reg = Register::new(name, self.num_qubits, size);
        self.num_qubits += size;
        let ids = reg.positions().map(QubitId).collect();
        self.qregs.push(reg);
        ids
    }

    /// Add one classical bit outside any register.
    pub fn add_clbit(&mut self) -> ClbitId {
        self.num_clbits += 1;
        ClbitId(self.num_clbits - 1)
    }

    /// Add a classical register and return its bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let reg = Register::new(name, self.num_clbits, size);
        self.num_clbits += size;
        let ids = reg.positions().map(ClbitId).collect();
        self.cregs.push(reg);
        ids
    }

    /// Validate an instruction against the circuit and append it.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        let op_name = Some(instruction.name().to_string());

        if let InstructionKind::Gate(gate) = instruction.kind {
            let expected = gate.num_qubits();
            let got = instruction.qubits.len() as u32;
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        if instruction.is_measure() && instruction.qubits.len() != instruction.clbits.len() {
            return Err(IrError::MeasureArityMismatch {
                qubits: instruction.qubits.len(),
                clbits: instruction.clbits.len(),
            });
        }

        if let Some(&qubit) = instruction.qubits.iter().find(|q| q.0 >= self.num_qubits) {
            return Err(IrError::QubitNotFound {
                qubit,
                num_qubits: self.num_qubits(),
                op_name,
            });
        }

        if let Some(&clbit) = instruction.clbits.iter().find(|c| c.0 >= self.num_clbits) {
            return Err(IrError::ClbitNotFound {
                clbit,
                num_clbits: self.num_clbits(),
                op_name,
            });
        }

        let mut seen = FxHashSet::default();
        if let Some(&qubit) = instruction.qubits.iter().find(|q| !seen.insert(**q)) {
            return Err(IrError::DuplicateQubit { qubit, op_name });
        }

        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply identity gate.
    pub fn i(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::I, [qubit])
    }

    /// Apply Pauli-X (NOT) gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [qubit])
    }

    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Y, [qubit])
    }

    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Z, [qubit])
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::S, [qubit])
    }

    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Sdg, [qubit])
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CZ, [control, target])
    }

    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Swap, [q1, q2])
    }

    /// Apply a standard gate to the given qubits.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.measure_many([qubit], [clbit])
    }

    /// Measure `qubits[i]` into `clbits[i]` for every position.
    pub fn measure_many(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubits, clbits)?)
    }

    /// Measure qubit `i` into classical bit `i` for every qubit, adding
    /// classical bits if there are fewer than qubits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits < self.num_qubits {
            self.add_clbit();
        }
        let n = self.num_qubits;
        self.measure_many((0..n).map(QubitId), (0..n).map(ClbitId))
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::reset(qubit))
    }

    /// Add a barrier on specific qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Add a barrier on all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.barrier((0..self.num_qubits).map(QubitId))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn qregs(&self) -> &[Register] {
        &self.qregs
    }

    pub fn cregs(&self) -> &[Register] {
        &self.cregs
    }

    /// Qubits touched by a gate, measurement or reset, in ascending order.
    ///
    /// Barriers do not count. Qubits outside this list stay in |0⟩ for the
    /// whole circuit.
    pub fn active_qubits(&self) -> Vec<QubitId> {
        let mut touched = vec![false; self.num_qubits()];
        for inst in self.instructions.iter().filter(|i| !i.is_barrier()) {
            for q in &inst.qubits {
                touched[q.index()] = true;
            }
        }
        (0..self.num_qubits)
            .map(QubitId)
            .filter(|q| touched[q.index()])
            .collect()
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Calculate the circuit depth.
    ///
    /// Each instruction sits one layer above the deepest wire it touches,
    /// quantum or classical.
    pub fn depth(&self) -> usize {
        let mut qubit_depth = vec![0usize; self.num_qubits()];
        let mut clbit_depth = vec![0usize; self.num_clbits()];
        for inst in &self.instructions {
            let start = inst
                .qubits
                .iter()
                .map(|q| qubit_depth[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_depth[c.index()]))
                .max()
                .unwrap_or(0);
            let layer = start + 1;
            for q in &inst.qubits {
                qubit_depth[q.index()] = layer;
            }
            for c in &inst.clbits {
                clbit_depth[c.index()] = layer;
            }
        }

        qubit_depth
            .into_iter()
            .chain(clbit_depth)
            .max()
            .unwrap_or(0)
    }

    /// Count instructions by name.
    pub fn count_ops(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_default() += 1;
        }
        counts
    }

    /// Whether any gate or reset follows a measurement.
    ///
    /// Circuits without mid-circuit measurement can be evolved once and
    /// sampled repeatedly.
    pub fn has_mid_circuit_measurement(&self) -> bool {
        let mut measured = false;
        for inst in &self.instructions {
            match inst.kind {
                InstructionKind::Measure => measured = true,
                InstructionKind::Gate(_) | InstructionKind::Reset if measured => return true,
                _ => {}
            }
        }
        false
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        let q0 = QubitId(0);
        let q1 = QubitId(1);

        circuit
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;

        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n, n);

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        for i in 0..n {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let loose = circuit.add_qubit();
        let data = circuit.add_qreg("data", 3);
        let creg = circuit.add_creg("out", 2);

        assert_eq!(loose, QubitId(0));
        assert_eq!(data, [QubitId(1), QubitId(2), QubitId(3)]);
        assert_eq!(creg, [ClbitId(0), ClbitId(1)]);
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.qregs(), [Register::new("data", 1, 3)]);
        assert_eq!(circuit.cregs(), [Register::new("out", 0, 2)]);
    }

    #[test]
    fn test_with_size_names_registers() {
        let circuit = Circuit::with_size("test", 4, 2);
        assert_eq!(circuit.qregs(), [Register::new("q", 0, 4)]);
        assert_eq!(circuit.cregs(), [Register::new("c", 0, 2)]);
        assert!(Circuit::with_size("bare", 2, 0).cregs().is_empty());
    }

    #[test]
    fn test_active_qubits_skip_idle_and_barriers() {
        let mut circuit = Circuit::with_size("test", 6, 6);
        circuit
            .x(QubitId(4))
            .unwrap()
            .barrier_all()
            .unwrap()
            .measure(QubitId(1), ClbitId(0))
            .unwrap();

        assert_eq!(circuit.active_qubits(), [QubitId(1), QubitId(4)]);
        assert!(Circuit::with_size("idle", 3, 0).active_qubits().is_empty());
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
    }

    #[test]
    fn test_ghz_state() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_clbits(), 5);
        assert_eq!(circuit.count_ops()["cx"], 4);
        assert_eq!(Circuit::ghz(0).unwrap().num_qubits(), 0);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .x(QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.num_ops(), 4);
        assert_eq!(circuit.depth(), 2); // parallel X, parallel measures
        assert_eq!(circuit.count_ops()["x"], 2);
        assert_eq!(circuit.count_ops()["measure"], 2);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::with_size("test", 1, 2);
        match circuit.x(QubitId(1)) {
            Err(IrError::QubitNotFound {
                qubit,
                num_qubits,
                op_name,
            }) => {
                assert_eq!(qubit, QubitId(1));
                assert_eq!(num_qubits, 1);
                assert_eq!(op_name.as_deref(), Some("x"));
            }
            other => panic!("Expected QubitNotFound, got {other:?}"),
        }
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_clbit_out_of_range() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        let result = circuit.measure(QubitId(1), ClbitId(1));
        assert!(matches!(
            result,
            Err(IrError::ClbitNotFound {
                clbit: ClbitId(1),
                num_clbits: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_gate_arity_mismatch() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let result = circuit.gate(StandardGate::CX, [QubitId(0)]);
        match result {
            Err(IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            }) => {
                assert_eq!(gate_name, "cx");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("Expected QubitCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let result = circuit.cx(QubitId(1), QubitId(1));
        assert!(matches!(result, Err(IrError::DuplicateQubit { .. })));
    }

    #[test]
    fn test_measure_all_allocates_clbits() {
        let mut circuit = Circuit::with_size("test", 3, 1);
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
        assert_eq!(circuit.instructions()[0].clbits.len(), 3);
    }

    #[test]
    fn test_mid_circuit_measurement() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit.x(QubitId(0)).unwrap().measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(!circuit.has_mid_circuit_measurement());

        circuit.barrier_all().unwrap();
        assert!(!circuit.has_mid_circuit_measurement());

        circuit.reset(QubitId(0)).unwrap();
        assert!(circuit.has_mid_circuit_measurement());
    }

    proptest! {
        #[test]
        fn prop_out_of_range_qubit_is_rejected(size in 0u32..16, offset in 0u32..16) {
            let mut circuit = Circuit::with_size("prop", size, 0);
            let result = circuit.x(QubitId(size + offset));
            let rejected = matches!(result, Err(IrError::QubitNotFound { .. }));
            prop_assert!(rejected);
            prop_assert_eq!(circuit.num_ops(), 0);
        }

        #[test]
        fn prop_depth_of_parallel_layer_is_one(size in 1u32..16) {
            let mut circuit = Circuit::with_size("prop", size, 0);
            for q in 0..size {
                circuit.x(QubitId(q)).unwrap();
            }
            prop_assert_eq!(circuit.depth(), 1);
        }
    }
}
