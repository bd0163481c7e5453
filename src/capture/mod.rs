//! Capture pipeline
//!
//! - `StreamInterceptor`: receives raw fragments, mirrors them to a backing
//!   file, renders them onto a surface and records them in the append log
//! - `AppendLog`: every fragment in arrival order, with a diagnostic dump
//! - `OutputContext`: explicit handle to the host's current output target
//! - `CaptureSession`: swaps an `OutputContext` over to an interceptor and
//!   restores it on every exit path

mod backing;
mod context;
mod interceptor;
mod log;
mod session;
mod utf8;

pub use context::{OutputContext, SharedBuffer};
pub use interceptor::StreamInterceptor;
pub use log::{repr, AppendLog};
pub use session::CaptureSession;
