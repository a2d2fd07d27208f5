pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod sync;

pub use config::{Config, SyncConfig};
pub use error::{Error, Result};
pub use github::{ClassroomClient, HttpTransport, Transport};
pub use sync::ClassroomSync;
