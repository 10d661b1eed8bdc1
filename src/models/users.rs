use crate::entities::users::User;
use serde::Serialize;

/// A conversation partner as shown to a viewer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Peer {
    pub id: i64,
    /// Unset for identities only ever seen through their id.
    pub username: Option<String>,
    pub has_unread: bool,
}

impl Peer {
    pub fn new(user: User, has_unread: bool) -> Self {
        Self {
            id: user.id,
            username: user.username,
            has_unread,
        }
    }
}
