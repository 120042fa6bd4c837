//! Demo runners for executing circuits on a backend.

pub mod not_gate;

pub use not_gate::{
    NOT_GATE_SHOTS, run_not_gate_on, single_qubit_measure, single_qubit_measure_on,
};
