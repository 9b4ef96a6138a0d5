pub mod enabled;
pub mod principal;

pub use enabled::parse_enabled;
pub use principal::Principal;
