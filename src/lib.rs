pub mod config;
pub mod gpa;
pub mod output;
pub mod prompt;
pub mod session;
pub mod sheet;
