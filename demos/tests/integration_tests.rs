//! Integration tests for the demo suite.
//!
//! These run the NOT gate demo end to end on the local simulator.

use proptest::prelude::*;

use qflip_adapter_sim::SimulatorBackend;
use qflip_demos::DemoError;
use qflip_demos::runners::{
    NOT_GATE_SHOTS, run_not_gate_on, single_qubit_measure, single_qubit_measure_on,
};
use qflip_hal::{Counts, HalError};
use qflip_ir::IrError;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

/// Expected single outcome: `1` on clbits 0 and 1, `0` elsewhere.
fn expected_bitstring(classical_bits: u32) -> String {
    format!("{}11", "0".repeat(classical_bits as usize - 2))
}

/// The canonical two-qubit run.
#[tokio::test]
async fn test_two_qubit_histogram() {
    let counts = single_qubit_measure(2, 2).await.unwrap();

    assert_eq!(counts, Counts::from_pairs([("11", 1000)]));
    assert_eq!(
        format!("Total count for various states are: {counts}"),
        "Total count for various states are: {'11': 1000}"
    );
}

/// Wider registers pad the unmeasured bits with zeros on the left.
#[tokio::test]
async fn test_four_qubit_histogram() {
    let counts = single_qubit_measure(4, 4).await.unwrap();

    assert_eq!(counts, Counts::from_pairs([("0011", 1000)]));
    assert_eq!(counts.to_string(), "{'0011': 1000}");
}

/// Mismatched register sizes key on the classical register width.
#[tokio::test]
async fn test_register_sizes_differ() {
    let counts = single_qubit_measure(5, 2).await.unwrap();
    assert_eq!(counts.get("11"), 1000);

    let counts = single_qubit_measure(2, 6).await.unwrap();
    assert_eq!(counts.get("000011"), 1000);
}

/// Registers smaller than two fail with an out-of-range index.
#[tokio::test]
async fn test_small_registers_fail() {
    for (qubits, classical_bits) in [(0, 0), (1, 1), (1, 4), (0, 2)] {
        let err = single_qubit_measure(qubits, classical_bits).await.unwrap_err();
        assert!(
            matches!(err, DemoError::Circuit(IrError::QubitNotFound { .. })),
            "({qubits}, {classical_bits}) gave {err}"
        );
    }

    for classical_bits in [0, 1] {
        let err = single_qubit_measure(3, classical_bits).await.unwrap_err();
        assert!(matches!(
            err,
            DemoError::Circuit(IrError::ClbitNotFound { .. })
        ));
    }
}

/// Only the qubits the circuit touches count against the simulator budget.
#[tokio::test]
async fn test_qubit_budget_counts_touched_qubits() {
    let backend = SimulatorBackend::with_max_qubits(2);
    let counts = single_qubit_measure_on(&backend, 8, 2, 10).await.unwrap();
    assert_eq!(counts.get("11"), 10);

    let backend = SimulatorBackend::with_max_qubits(1);
    let err = single_qubit_measure_on(&backend, 8, 2, 10)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DemoError::Backend(HalError::CircuitTooLarge(_))
    ));
}

/// Registers wider than the default qubit budget still run.
#[tokio::test]
async fn test_wide_registers() {
    let counts = single_qubit_measure(21, 2).await.unwrap();
    assert_eq!(counts.to_string(), "{'11': 1000}");

    let counts = single_qubit_measure(32, 32).await.unwrap();
    let expected = format!("{}11", "0".repeat(30));
    assert_eq!(counts, Counts::from_pairs([(expected.as_str(), 1000)]));
}

/// Repeated runs produce the same output.
#[tokio::test]
async fn test_runs_are_idempotent() {
    let first = single_qubit_measure(3, 3).await.unwrap();
    let second = single_qubit_measure(3, 3).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

/// The execution result serializes with counts keyed by bitstring.
#[tokio::test]
async fn test_execution_result_json() {
    let backend = SimulatorBackend::new().with_seed(1);
    let result = run_not_gate_on(&backend, 2, 3, NOT_GATE_SHOTS).await.unwrap();

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["counts"]["011"], 1000);
    assert_eq!(json["shots"], 1000);
    assert_eq!(json["metadata"]["circuit"], "not_gate");
    assert_eq!(json["metadata"]["creg_sizes"], serde_json::json!([["c", 3]]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Every valid register size yields a single bitstring ending in `11`.
    #[test]
    fn prop_single_outcome(qubits in 2u32..=40, classical_bits in 2u32..=40) {
        let counts = runtime()
            .block_on(single_qubit_measure(qubits, classical_bits))
            .unwrap();

        prop_assert_eq!(counts.len(), 1);
        prop_assert_eq!(counts.total_shots(), u64::from(NOT_GATE_SHOTS));

        let (bitstring, count) = counts.most_frequent().unwrap();
        prop_assert_eq!(bitstring, &expected_bitstring(classical_bits));
        prop_assert_eq!(*count, 1000);
    }
}
