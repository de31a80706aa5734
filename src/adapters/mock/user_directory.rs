use crate::domain::value_objects::UserId;
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait, UserRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock implementation of UserDirectory
///
/// Supports stateful testing by storing user records in memory.
/// Users can be registered up front and looked up by id.
#[allow(dead_code)]
pub struct UserDirectory {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

#[allow(dead_code)]
impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Register a user for testing purposes
    pub fn add_user(&self, user: UserRecord) {
        self.users.lock().unwrap().insert(user.user_id, user);
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    /// Check if the user id is among the registered users
    async fn exists(&self, user_id: UserId) -> Result<bool> {
        Ok(self.users.lock().unwrap().contains_key(&user_id))
    }

    /// Look up a registered user record
    async fn find(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}
