pub mod persistence;
pub mod sync;
