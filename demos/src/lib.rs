//! qflip Demo Suite
//!
//! Small end-to-end programs that build a circuit, run it on the local
//! simulator and report the measured histogram.
//!
//! - **NOT gate**: flip two qubits and measure them, see
//!   [`runners::single_qubit_measure`]
//!
//! ```ignore
//! use qflip_demos::runners::single_qubit_measure;
//!
//! let counts = single_qubit_measure(2, 2).await?;
//! assert_eq!(counts.to_string(), "{'11': 1000}");
//! ```

pub mod circuits;
pub mod error;
pub mod runners;

pub use error::{DemoError, DemoResult};
