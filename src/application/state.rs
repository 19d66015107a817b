use crate::services::lifecycle::ApplicationLifecycle;
use crate::services::notification::NotificationService;
use crate::services::storage::DocumentStore;

/// Database connection type alias
pub use crate::db::DbConn;

/// Application state containing all shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub lifecycle: ApplicationLifecycle,
    pub notification: NotificationService,
    pub documents: DocumentStore,
}

impl AppState {
    pub fn new(db: DbConn, notification: NotificationService, documents: DocumentStore) -> Self {
        Self {
            lifecycle: ApplicationLifecycle::new(db.clone(), notification.clone()),
            db,
            notification,
            documents,
        }
    }
}
