//! DisasterWatch client library.
//!
//! REST access to the DisasterWatch backend for operators and citizens,
//! chat-completion recommendations, and an in-process mock backend for
//! working without a server.

pub mod ai;
pub mod config;
pub mod error;
pub mod logging;
pub mod mock;
pub mod rest;
pub mod session;
pub mod source;

pub use error::ClientError;
pub use mock::MockBackend;
pub use rest::{AdminClient, PublicClient};
pub use session::{Session, SessionEvent};
pub use source::DataSource;
