use uuid::Uuid;

#[derive(Copy, Clone, Debug)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: i64,
}
