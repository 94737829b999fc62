pub mod achievement;
pub mod assignment;
pub mod participant;
pub mod session;
pub mod submission;
