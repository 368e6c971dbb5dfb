/// Remote service abstraction for Wishdeck
///
/// The synchronization engine talks to the remote source of truth
/// through the `RemoteService` trait; any asynchronous transport
/// satisfies the contract. `MockRemote` is the in-process
/// implementation with simulated latency and failure injection.

pub mod mock;

pub use mock::MockRemote;

use async_trait::async_trait;

use wishdeck_core::{Card, CardUpdate, Cover, RecordId, Result, Stack, StackUpdate};

/// CRUD surface of the remote data service.
///
/// The server assigns authoritative identifiers and creation
/// timestamps on create; updates and deletes fail with `NotFound`
/// when the target does not exist server-side. The engine treats any
/// error identically for rollback purposes.
#[async_trait]
pub trait RemoteService: Send + Sync {
    async fn list_stacks(&self) -> Result<Vec<Stack>>;

    async fn create_stack(&self, name: &str, cover: Cover) -> Result<Stack>;

    async fn update_stack(&self, id: &RecordId, update: StackUpdate) -> Result<Stack>;

    /// Deleting a stack cascades to its cards server-side.
    async fn delete_stack(&self, id: &RecordId) -> Result<()>;

    /// `stack_id = None` lists every card.
    async fn list_cards(&self, stack_id: Option<&RecordId>) -> Result<Vec<Card>>;

    async fn create_card(
        &self,
        cover: &str,
        name: &str,
        description: Option<String>,
        stack_id: &RecordId,
    ) -> Result<Card>;

    async fn update_card(&self, id: &RecordId, update: CardUpdate) -> Result<Card>;

    async fn delete_card(&self, id: &RecordId) -> Result<()>;
}
