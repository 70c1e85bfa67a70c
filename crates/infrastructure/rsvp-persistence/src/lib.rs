mod api;
mod codec;
mod error;
mod keys;
mod maintenance;
mod redb_store;

pub use api::*;
pub use error::*;
pub use redb_store::RedbRsvpStore;
