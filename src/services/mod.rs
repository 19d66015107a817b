pub mod accounts;
pub mod lifecycle;
pub mod messaging;
pub mod notification;
pub mod security;
pub mod storage;

pub use lifecycle::ApplicationLifecycle;
pub use notification::NotificationService;
pub use security::*;
pub use storage::DocumentStore;
