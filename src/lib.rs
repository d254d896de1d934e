//! # Importer mocks
//!
//! Test doubles for driving an importer plugin without a live server:
//!
//! - [`transfer`]: a simulated multi-handle transfer engine serving fixed
//!   payloads through write callbacks.
//! - [`conduit`]: the host conduit contract and recording mocks backed by
//!   in-memory unit lists.
//! - [`config`]: plugin call configuration with retries disabled.
//! - [`iso`]: the seeded ISO repository and its checksum manifest.

pub mod conduit;
pub mod config;
mod errors;
pub mod iso;
pub mod logging;
pub mod transfer;
pub mod unit;

pub use config::{basic_config, PluginCallConfig};
pub use errors::{MockError, Result};
pub use transfer::{HandleId, TransferHandle, TransferPool};
pub use unit::{Report, SearchCriteria, Unit, UnitCriteria};
