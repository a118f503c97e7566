//! # User Repository
//!
//! Registration, lookup and credential checks.
//!
//! Credential hashing is deliberately slow, so it runs with no lock held:
//! ```text
//! create_user
//!   ├── validate fields
//!   ├── users.read   → early Conflict on a known email
//!   ├── hash credential            (no lock)
//!   └── users.write  → re-check email, insert row + index
//! ```

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use tienda_core::validation::{
    normalize_email, validate_credential, validate_email, validate_user_name,
};
use tienda_core::{NewUser, User, UserId};

use crate::capability::UserDirectory;
use crate::error::{StoreError, StoreResult};
use crate::store::{MemoryStore, UserRecord};

fn email_conflict(email: &str) -> StoreError {
    StoreError::conflict(format!("email {} is already registered", email))
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn create_user(&self, input: NewUser) -> StoreResult<User> {
        validate_user_name(&input.name)?;
        validate_email(&input.email)?;
        validate_credential(&input.credential)?;

        let email = normalize_email(&input.email);
        if self.users.read().await.email_taken(&email) {
            return Err(email_conflict(&email));
        }

        let credential_hash = self.hasher.hash(&input.credential)?;

        let mut users = self.users.write().await;
        // Another registration may have won while we were hashing.
        if users.email_taken(&email) {
            return Err(email_conflict(&email));
        }

        let now = Utc::now();
        let user = users
            .rows
            .insert_with(|id| UserRecord {
                user: User {
                    id,
                    name: input.name.trim().to_string(),
                    email: email.clone(),
                    created_at: now,
                },
                credential_hash,
            })
            .user
            .clone();
        users.by_email.insert(email, user.id);

        debug!(id = user.id, "Registered user");
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.users
            .read()
            .await
            .rows
            .get(id)
            .map(|record| record.user.clone())
            .ok_or_else(|| StoreError::not_found("User", id))
    }

    async fn authenticate(&self, email: &str, credential: &str) -> StoreResult<User> {
        let record = self
            .users
            .read()
            .await
            .find_by_email(email)
            .cloned()
            .ok_or(StoreError::Unauthorized)?;

        if !self.hasher.verify(credential, &record.credential_hash) {
            return Err(StoreError::Unauthorized);
        }

        debug!(id = record.user.id, "Authenticated user");
        Ok(record.user)
    }
}
