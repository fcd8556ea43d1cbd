// Sub-modules organized by functional domain
pub mod api;
pub mod auth;
pub mod meeting;
pub mod project;
pub mod task;

pub use api::*;
pub use auth::*;
pub use meeting::*;
pub use project::*;
pub use task::*;
