pub mod promote_scheduled_messages;
