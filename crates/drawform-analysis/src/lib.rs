//! # Drawform-Analysis
//!
//! Per-frame archery draw form analysis. One landmark snapshot goes in,
//! plain data comes out:
//!
//! 1. **Metrics** — six form metrics computed from the landmark
//!    geometry for the configured handedness ([`FormMetrics`]).
//! 2. **Evaluation** — each metric checked against a configurable
//!    threshold table ([`ThresholdTable`]).
//! 3. **Phase** — coarse draw-cycle stage inferred from the current
//!    and previous metrics ([`Phase`]).
//! 4. **Scoring & feedback** — failing checks classified by severity,
//!    an aggregate 0-100 score, and a prioritized corrective message.
//! 5. **History** — captured shots accumulated per session with
//!    summary statistics ([`ShotHistory`]).
//!
//! The engine is synchronous and frame-driven; every frame is
//! recomputed from scratch and a frame that fails (missing landmark)
//! is simply dropped.

pub mod analyzer;
pub mod metrics;
pub mod phase;
pub mod scoring;
pub mod session;
pub mod thresholds;

pub use analyzer::*;
pub use metrics::*;
pub use phase::*;
pub use scoring::*;
pub use session::*;
pub use thresholds::*;
