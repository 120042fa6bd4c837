//! NOT gate runner.
//!
//! Builds [`not_gate_circuit`], executes it and returns the histogram. Both
//! measured qubits are in |1⟩, so every shot lands on the same bitstring.

use tracing::{debug, info, instrument};

use qflip_adapter_sim::SimulatorBackend;
use qflip_hal::{Backend, Counts, ExecutionResult};

use crate::circuits::not_gate_circuit;
use crate::error::DemoResult;

/// Shots taken by [`single_qubit_measure`].
pub const NOT_GATE_SHOTS: u32 = 1000;

/// Run the NOT gate circuit on a fresh local simulator.
///
/// With `qubits = classical_bits = 2` the result is `{'11': 1000}`; wider
/// classical registers pad with leading zeros, e.g. `{'0011': 1000}`.
pub async fn single_qubit_measure(qubits: u32, classical_bits: u32) -> DemoResult<Counts> {
    let backend = SimulatorBackend::new();
    single_qubit_measure_on(&backend, qubits, classical_bits, NOT_GATE_SHOTS).await
}

/// Run the NOT gate circuit on `backend` for `shots` shots.
pub async fn single_qubit_measure_on(
    backend: &dyn Backend,
    qubits: u32,
    classical_bits: u32,
    shots: u32,
) -> DemoResult<Counts> {
    let result = run_not_gate_on(backend, qubits, classical_bits, shots).await?;
    Ok(result.counts)
}

/// Run the NOT gate circuit and keep the full [`ExecutionResult`], metadata
/// and timing included.
#[instrument(skip(backend), fields(backend = backend.name()))]
pub async fn run_not_gate_on(
    backend: &dyn Backend,
    qubits: u32,
    classical_bits: u32,
    shots: u32,
) -> DemoResult<ExecutionResult> {
    let circuit = not_gate_circuit(qubits, classical_bits)?;
    debug!(depth = circuit.depth(), ops = circuit.num_ops(), "Built circuit");

    let job_id = backend.submit(&circuit, shots).await?;
    let result = backend.wait(&job_id).await?;

    info!(%job_id, counts = %result.counts, "NOT gate run complete");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DemoError;
    use qflip_hal::{BackendConfig, BackendFactory, HalError};
    use qflip_ir::IrError;

    #[tokio::test]
    async fn test_single_qubit_measure_two_bits() {
        let counts = single_qubit_measure(2, 2).await.unwrap();

        assert_eq!(counts.get("11"), 1000);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.to_string(), "{'11': 1000}");
    }

    #[tokio::test]
    async fn test_single_qubit_measure_on_custom_backend() {
        let backend = SimulatorBackend::from_config(
            BackendConfig::new("seeded").with_extra("seed", serde_json::json!(9)),
        )
        .unwrap();

        let counts = single_qubit_measure_on(&backend, 3, 4, 25).await.unwrap();
        assert_eq!(counts.get("0011"), 25);
        assert_eq!(counts.total_shots(), 25);
    }

    #[tokio::test]
    async fn test_errors_are_surfaced() {
        let err = single_qubit_measure(1, 2).await.unwrap_err();
        assert!(matches!(
            err,
            DemoError::Circuit(IrError::QubitNotFound { .. })
        ));

        let backend = SimulatorBackend::new();
        let err = single_qubit_measure_on(&backend, 2, 2, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DemoError::Backend(HalError::InvalidShots { .. })));
    }

    #[tokio::test]
    async fn test_run_not_gate_on_keeps_metadata() {
        let backend = SimulatorBackend::new().with_seed(4);

        let result = run_not_gate_on(&backend, 3, 2, NOT_GATE_SHOTS).await.unwrap();
        assert_eq!(result.counts.to_string(), "{'11': 1000}");
        assert_eq!(result.metadata["qreg_sizes"], serde_json::json!([["q", 3]]));

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["counts"]["11"], 1000);
    }
}
