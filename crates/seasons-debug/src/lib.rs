//! Remote inspection and control of a running seasons simulation.
//!
//! The server speaks newline-delimited JSON over TCP on localhost:
//! ```ignore
//! let handler = Arc::new(Mutex::new(MyHandler::new()));
//! let _server = DebugServer::start(handler, seasons_debug::DEFAULT_PORT);
//! ```

pub mod protocol;
pub mod server;
pub mod snapshot;

pub use protocol::*;
pub use server::{DebugHandler, DebugServer};
pub use snapshot::{encode_png_base64, SnapshotError};

/// Default debug server port
pub const DEFAULT_PORT: u16 = 9742;
