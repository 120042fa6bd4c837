//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

use qflip_ir::{Circuit, StandardGate};

use crate::backend::ValidationResult;

/// Capabilities of a backend, cached at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set (OpenQASM naming).
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`,
    /// `"mid_circuit_measurement"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 100_000,
            is_simulator: true,
            features: vec!["statevector".into(), "mid_circuit_measurement".into()],
        }
    }

    /// Set the shot limit.
    #[must_use]
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Check whether a feature flag is present.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Check a circuit against the qubit budget and the gate set.
    ///
    /// Only qubits some operation acts on count towards the budget; idle
    /// qubits never leave |0⟩ and are not simulated.
    pub fn check(&self, circuit: &Circuit) -> ValidationResult {
        let mut reasons = vec![];

        let used = circuit.active_qubits().len();
        if used > self.num_qubits as usize {
            reasons.push(format!(
                "circuit uses {used} qubits but {} supports {}",
                self.name, self.num_qubits
            ));
        }

        let mut unsupported: Vec<_> = circuit
            .instructions()
            .iter()
            .filter_map(qflip_ir::Instruction::as_gate)
            .map(|g| g.name())
            .filter(|name| !self.gate_set.contains(name))
            .collect();
        unsupported.sort_unstable();
        unsupported.dedup();
        for name in unsupported {
            reasons.push(format!("gate '{name}' is not in the gate set"));
        }

        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons }
        }
    }
}

/// Set of gate names a backend executes natively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Gate names in OpenQASM naming.
    pub gates: Vec<String>,
}

impl GateSet {
    /// Create a gate set from names.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Every standard gate.
    pub fn universal() -> Self {
        Self::new(StandardGate::ALL.iter().map(StandardGate::name))
    }

    /// Check whether a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }
}
