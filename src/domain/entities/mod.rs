pub mod alert;
pub mod user;

pub use alert::{Alert, AlertId, DetailedAlert, NewAlert};
pub use user::User;
