//! Simulated multi-handle transfer engine.
//!
//! [`TransferHandle`] stands in for a single fetch using a write-callback
//! client, [`TransferPool`] for the multiplexing engine that drives many
//! handles. Everything runs eagerly on the calling thread: `perform_all`
//! has written every payload before it returns.

mod capture;
mod fixture;
mod handle;
mod pool;

pub use capture::CaptureBuffer;
pub use fixture::{Payload, PayloadFixture};
pub use handle::{HandleState, TransferHandle, WriteSink};
pub use pool::{Completions, HandleId, PerformStatus, TransferPool, STATUS_OK};
