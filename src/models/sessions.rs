use crate::entities::sessions::Session as SessionEntity;
use serde::Serialize;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: i64,
}

impl From<SessionEntity> for Session {
    fn from(value: SessionEntity) -> Self {
        Self {
            session_id: value.session_id,
            user_id: value.user_id,
        }
    }
}

impl From<Session> for SessionEntity {
    fn from(value: Session) -> Self {
        Self {
            session_id: value.session_id,
            user_id: value.user_id,
        }
    }
}
