pub mod guard;
pub mod task;
pub mod time;
pub mod validation;
