pub mod alert;
pub mod authorization;

pub use alert::{AlertService, UpdateOutcome};
pub use authorization::{AuthorizationGate, Authorized};
