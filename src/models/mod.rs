pub mod repo;
pub mod commit;
pub mod user;
pub mod workflow;
pub mod snapshot;

pub use repo::*;
pub use commit::*;
pub use user::*;
pub use workflow::*;
pub use snapshot::*;
