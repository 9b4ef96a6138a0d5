pub mod alert;
pub mod serve;
pub mod user;
