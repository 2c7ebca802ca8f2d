//! Headless Helio application: platform directories, the real-time frame
//! loop, and the session that ties config, logging, and the frame driver
//! together.

pub mod error;
pub mod frame_loop;
pub mod platform;
pub mod session;

pub use error::AppError;
pub use session::{HeadlessRenderer, Session, SessionSummary};
