//! qflip Local Statevector Simulator
//!
//! This crate provides a local quantum simulator for testing, development,
//! and small experiments. It keeps the full statevector, so results follow
//! the Born rule exactly, but memory grows as 2^n in the number of qubits the
//! circuit acts on. Declared but idle qubits cost nothing.
//!
//! # Features
//!
//! - **All Standard Gates**: Supports every gate from `qflip-ir`
//! - **Mid-Circuit Measurement**: Measurement collapses the state; reset is
//!   measure-then-flip
//! - **Reproducible Sampling**: Optional `seed` for deterministic counts
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```ignore
//! use qflip_adapter_sim::SimulatorBackend;
//! use qflip_hal::Backend;
//! use qflip_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new().with_seed(7);
//!
//!     // Verify capabilities (sync, infallible)
//!     let caps = backend.capabilities();
//!     println!("Max qubits: {}", caps.num_qubits);
//!
//!     // Run a Bell state
//!     let circuit = Circuit::bell()?;
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     // Expect ~50% |00⟩ and ~50% |11⟩
//!     println!("Results: {}", result.counts);
//!
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::{
    DEFAULT_MAX_QUBITS, DEFAULT_MAX_SHOTS, MAX_SIMULABLE_QUBITS, SimulatorBackend,
};
