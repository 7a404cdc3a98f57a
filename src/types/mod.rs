pub mod answers;
pub mod category;
pub mod config;
pub mod report;
pub mod student;
