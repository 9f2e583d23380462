pub mod agents;
pub mod chat;
pub mod health;
pub mod history;

use moodnest_persist::UserId;
use serde::Deserialize;
use utoipa::IntoParams;

/// `?user_id=` query shared by the read views; defaults to user 1
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UserQuery {
    /// Numeric user handle (default 1)
    pub user_id: Option<i64>,
}

impl UserQuery {
    pub fn user_id(&self) -> UserId {
        self.user_id.map(UserId).unwrap_or_default()
    }
}
