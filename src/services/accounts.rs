//! Lookups that treat students and admins as one kind of account.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::error::Result;
use crate::models::prelude::*;
use crate::models::role::Role;
use crate::models::{admin, student};

/// Public view of a student or admin account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: i64,
    pub role: Role,
    pub full_name: String,
    pub email: String,
}

impl From<student::Model> for Account {
    fn from(s: student::Model) -> Self {
        Self {
            id: s.id,
            role: Role::Student,
            full_name: s.full_name,
            email: s.email,
        }
    }
}

impl From<admin::Model> for Account {
    fn from(a: admin::Model) -> Self {
        Self {
            id: a.id,
            role: Role::Admin,
            full_name: a.full_name,
            email: a.email,
        }
    }
}

/// Find an account by id in the table for `role`
pub async fn find_account<C: ConnectionTrait>(db: &C, role: Role, id: i64) -> Result<Option<Account>> {
    let account = match role {
        Role::Student => Student::find_by_id(id).one(db).await?.map(Account::from),
        Role::Admin => Admin::find_by_id(id).one(db).await?.map(Account::from),
    };
    Ok(account)
}

/// Find an account by email, returning it with its password hash
pub async fn find_credentials<C: ConnectionTrait>(
    db: &C,
    role: Role,
    email: &str,
) -> Result<Option<(Account, String)>> {
    let email = normalize_email(email);
    let found = match role {
        Role::Student => Student::find()
            .filter(student::Column::Email.eq(email))
            .one(db)
            .await?
            .map(|s| {
                let hash = s.hashed_password.clone();
                (Account::from(s), hash)
            }),
        Role::Admin => Admin::find()
            .filter(admin::Column::Email.eq(email))
            .one(db)
            .await?
            .map(|a| {
                let hash = a.hashed_password.clone();
                (Account::from(a), hash)
            }),
    };
    Ok(found)
}

/// Emails are stored trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_admin, create_test_db, create_test_student};

    #[tokio::test]
    async fn test_find_account_respects_role_table() {
        let db = create_test_db().await;
        let student = create_test_student(&db, "Thandi Nkosi", "thandi@example.com").await;

        let found = find_account(&db, Role::Student, student.id).await.unwrap();
        assert_eq!(found.map(|a| a.email), Some("thandi@example.com".to_string()));

        // Same id in the admins table does not exist
        let missing = find_account(&db, Role::Admin, student.id).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_credentials_normalizes_email() {
        let db = create_test_db().await;
        let admin = create_test_admin(&db, "Grace Admin", "grace@example.com").await;

        let (account, hash) = find_credentials(&db, Role::Admin, "  GRACE@example.com ")
            .await
            .unwrap()
            .expect("admin should be found");

        assert_eq!(account.id, admin.id);
        assert_eq!(account.role, Role::Admin);
        assert_eq!(hash, admin.hashed_password);
    }
}
