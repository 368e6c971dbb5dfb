/// Core data model for Wishdeck
///
/// Defines the stack/card model, typed partial updates, cover
/// synthesis, the error taxonomy, and the durable local store that
/// the synchronization engine keeps coherent with memory.

pub mod cover;
pub mod error;
pub mod store;
pub mod types;
pub mod update;

pub use cover::{Cover, GRADIENT_PALETTE};
pub use error::{Error, Result};
pub use store::LocalStore;
pub use types::{now_millis, Card, RecordId, Stack, TEMP_ID_PREFIX};
pub use update::{CardUpdate, StackUpdate};
