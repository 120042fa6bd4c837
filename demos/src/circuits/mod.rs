//! Quantum circuit generators for demos.

pub mod not_gate;

pub use not_gate::not_gate_circuit;
