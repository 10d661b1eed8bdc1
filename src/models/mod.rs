pub mod events;
pub mod messages;
pub mod scheduled_messages;
pub mod sessions;
pub mod summaries;
pub mod users;
