//! inkhole-core: domain model and pure logic for the status panel.
//!
//! Maps raw appliance payloads (either schema generation) onto the
//! canonical [`Summary`], formats the panel text, and decides via
//! content fingerprinting whether the display needs a redraw.

pub mod dashboard;
pub mod error;
pub mod fingerprint;
pub mod model;
pub mod monitor;
pub mod normalize;

pub use error::CoreError;
pub use fingerprint::{
    ChangeDetector, FileFingerprintStore, FingerprintStore, MemoryFingerprintStore,
};
pub use model::Summary;
pub use monitor::StatusMonitor;
