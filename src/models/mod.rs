pub mod admin;
pub mod application;
pub mod bursary;
pub mod conversation;
pub mod document;
pub mod message;
pub mod role;
pub mod status_update;
pub mod student;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::admin::{self, Entity as Admin};
    pub use super::application::{self, Entity as Application};
    pub use super::bursary::{self, Entity as Bursary};
    pub use super::conversation::{self, Entity as Conversation};
    pub use super::document::{self, Entity as Document};
    pub use super::message::{self, Entity as Message};
    pub use super::status_update::{self, Entity as StatusUpdate};
    pub use super::student::{self, Entity as Student};
}
