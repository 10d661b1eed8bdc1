pub mod messages;
pub mod scheduled_messages;
pub mod sessions;
pub mod streams;
pub mod users;
