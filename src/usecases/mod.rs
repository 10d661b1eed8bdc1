pub mod conversations;
pub mod delivery;
pub mod events;
pub mod messages;
pub mod read_state;
pub mod scheduler;
pub mod sessions;
pub mod summaries;
