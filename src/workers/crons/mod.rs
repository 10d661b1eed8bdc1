pub mod scheduler_cron;
pub mod tasks;
