pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_students;
mod m20250601_000002_create_admins;
mod m20250601_000003_create_bursaries;
mod m20250601_000004_create_applications;
mod m20250601_000005_create_status_updates;
mod m20250601_000006_create_documents;
mod m20250601_000007_create_conversations;
mod m20250601_000008_create_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_students::Migration),
            Box::new(m20250601_000002_create_admins::Migration),
            Box::new(m20250601_000003_create_bursaries::Migration),
            Box::new(m20250601_000004_create_applications::Migration),
            Box::new(m20250601_000005_create_status_updates::Migration),
            Box::new(m20250601_000006_create_documents::Migration),
            Box::new(m20250601_000007_create_conversations::Migration),
            Box::new(m20250601_000008_create_messages::Migration),
        ]
    }
}
