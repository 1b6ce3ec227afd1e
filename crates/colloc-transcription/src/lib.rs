//! Colloc Transcription
//!
//! Run-time components that consume a shared collocation grid.
//!
//! A [`GridData`](colloc_core::GridData) is built once per phase and then
//! shared read-only. The components here turn values known on small node
//! subsets into values on every node:
//!
//! ```text
//! config ──► GridData ──┬─► TimeGrid        t, dt/dstau at every node
//!                       ├─► InterleaveComp  disc + col values  ─► all nodes
//!                       ├─► ControlInterp   control_input      ─► all nodes (+ rates)
//!                       ├─► StateInterp     state_input        ─► all nodes (+ rates)
//!                       └─► refine          old solution       ─► new grid
//! ```
//!
//! # Components
//!
//! - [`config`]: serializable grid configuration
//! - [`interleave`]: disc/col scatter with source deduplication
//! - [`time`]: node times
//! - [`interp`]: control and state interpolation
//! - [`refine`]: solution re-interpolation across aligned grids

pub mod error;
pub mod config;
pub mod interleave;
pub mod time;
pub mod interp;
pub mod refine;

// Re-exports
pub use error::TranscriptionError;
pub use config::{OrderSpec, TranscriptionConfig};
pub use interleave::{InterleaveComp, InterleaveJacobian};
pub use time::TimeGrid;
pub use interp::{ControlInterp, InterpolatedValues, StateInterp};
pub use refine::interpolate_solution;
