//! # rsp-extrema
//!
//! Respiratory cycle extrema for breathing analysis.
//!
//! This crate provides:
//! - **Extrema detection**: end-inspiration peaks and end-expiration troughs
//!   from a filtered respiration waveform
//! - **DSP passes**: zero-crossing localization and per-interval extremum search
//! - **Configuration**: TOML + environment layered detector settings
//!
//! ## Example
//!
//! ```ignore
//! use rsp_extrema::{ExtremaConfig, ExtremaDetector};
//!
//! let detector = ExtremaDetector::with_config(ExtremaConfig::new(1000, 0.3));
//!
//! match detector.detect(&filtered_rsp) {
//!     Ok(extrema) => {
//!         for (trough, peak) in extrema.cycles() {
//!             println!("inhale {} -> {}", trough, peak);
//!         }
//!     }
//!     Err(e) if e.is_no_cycles() => println!("no breathing cycles"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod config;
pub mod dsp;
pub mod error;
pub mod physio;

#[cfg(test)]
mod tests_proptest;

pub use config::{ConfigError, ExtremaConfig};
pub use error::{DetectionStage, ExtremaError};
pub use physio::{detect_batch, detect_extrema, BatchItem, ExtremaDetector, RspExtrema};
