pub mod application;
pub mod auth;
pub mod bursary;
pub mod message;
pub mod status;

pub use application::*;
pub use auth::*;
pub use bursary::*;
pub use message::*;
pub use status::*;
