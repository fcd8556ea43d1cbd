pub mod meetings;
pub mod projects;
pub mod tasks;
pub mod users;
