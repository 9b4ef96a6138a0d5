pub mod store;
pub mod synchronizer;

pub use store::{AlertStore, StoreError, UserStore};
pub use synchronizer::{AlertSynchronizer, SyncError};
