//! Respiratory estimators built on top of filtered RSP waveforms.
//!
//! Notes:
//! - Input is expected to be de-trended and band-limited around zero; no
//!   filtering happens here.
//! - Failures are returned per call. Batch callers decide what a failed
//!   recording turns into.

mod batch;
mod rsp_extrema;

#[cfg(feature = "parallel")]
pub use batch::detect_batch_parallel;
pub use batch::{detect_batch, BatchItem, BatchSummary};
pub use rsp_extrema::{
    detect_extrema, ExtremaDetector, ExtremaMarkers, RspExtrema, MIN_SIGNAL_LEN,
};

#[cfg(test)]
pub(crate) use rsp_extrema::reject_outliers;
