/// In-process mock of the remote data service.
///
/// Backs every call with an in-memory server-side state, simulates a
/// network round-trip of 300-500ms, and lets tests queue forced
/// failures for upcoming calls.
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;

use wishdeck_core::{
    now_millis, Card, CardUpdate, Cover, Error, RecordId, Result, Stack, StackUpdate,
};

use crate::RemoteService;

const DEFAULT_LATENCY_MS: (u64, u64) = (300, 500);

#[derive(Debug, Default)]
struct ServerState {
    stacks: Vec<Stack>,
    cards: Vec<Card>,
    /// Last assigned creation timestamp; assignments are strictly
    /// increasing so insertion order survives a re-sort even when two
    /// creates land in the same millisecond.
    last_created_at: i64,
}

impl ServerState {
    fn next_created_at(&mut self) -> i64 {
        let ts = now_millis().max(self.last_created_at + 1);
        self.last_created_at = ts;
        ts
    }
}

/// Mock remote service for development and tests.
pub struct MockRemote {
    state: Mutex<ServerState>,
    /// Messages queued by `fail_next`; each call consumes one.
    failures: Mutex<VecDeque<String>>,
    latency_ms: Option<(u64, u64)>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ServerState::default()),
            failures: Mutex::new(VecDeque::new()),
            latency_ms: Some(DEFAULT_LATENCY_MS),
        }
    }

    /// Skip the simulated round-trip delay entirely.
    pub fn without_latency() -> Self {
        Self::new().with_latency(0, 0)
    }

    pub fn with_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.latency_ms = if max_ms == 0 {
            None
        } else {
            Some((min_ms.min(max_ms), max_ms))
        };
        self
    }

    /// Force the next call to fail with `message`. Queued failures are
    /// consumed in order, one per call.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.failures.lock().push_back(message.into());
    }

    /// Seed server-side stacks, assigning authoritative ids as needed.
    pub fn seed_stacks(&self, stacks: Vec<Stack>) {
        self.state.lock().stacks.extend(stacks);
    }

    pub fn seed_cards(&self, cards: Vec<Card>) {
        self.state.lock().cards.extend(cards);
    }

    /// Snapshot of the server-side stacks (test inspection).
    pub fn server_stacks(&self) -> Vec<Stack> {
        self.state.lock().stacks.clone()
    }

    pub fn server_cards(&self) -> Vec<Card> {
        self.state.lock().cards.clone()
    }

    async fn round_trip(&self) -> Result<()> {
        if let Some((min, max)) = self.latency_ms {
            let ms = if min == max {
                min
            } else {
                rand::thread_rng().gen_range(min..=max)
            };
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        if let Some(message) = self.failures.lock().pop_front() {
            tracing::debug!(%message, "mock remote: injected failure");
            return Err(Error::RemoteFailure(message));
        }
        Ok(())
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteService for MockRemote {
    async fn list_stacks(&self) -> Result<Vec<Stack>> {
        self.round_trip().await?;
        Ok(self.state.lock().stacks.clone())
    }

    async fn create_stack(&self, name: &str, cover: Cover) -> Result<Stack> {
        self.round_trip().await?;
        let mut state = self.state.lock();
        let stack = Stack {
            id: RecordId::generate(),
            name: name.to_string(),
            cover,
            created_at: state.next_created_at(),
        };
        state.stacks.push(stack.clone());
        Ok(stack)
    }

    async fn update_stack(&self, id: &RecordId, update: StackUpdate) -> Result<Stack> {
        self.round_trip().await?;
        let mut state = self.state.lock();
        let stack = state
            .stacks
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| Error::NotFound(format!("stack {}", id)))?;
        update.apply_to(stack);
        Ok(stack.clone())
    }

    async fn delete_stack(&self, id: &RecordId) -> Result<()> {
        self.round_trip().await?;
        let mut state = self.state.lock();
        state.stacks.retain(|s| &s.id != id);
        // Server-side cascade
        state.cards.retain(|c| &c.stack_id != id);
        Ok(())
    }

    async fn list_cards(&self, stack_id: Option<&RecordId>) -> Result<Vec<Card>> {
        self.round_trip().await?;
        let state = self.state.lock();
        Ok(match stack_id {
            Some(id) => state
                .cards
                .iter()
                .filter(|c| &c.stack_id == id)
                .cloned()
                .collect(),
            None => state.cards.clone(),
        })
    }

    async fn create_card(
        &self,
        cover: &str,
        name: &str,
        description: Option<String>,
        stack_id: &RecordId,
    ) -> Result<Card> {
        self.round_trip().await?;
        let mut state = self.state.lock();
        let card = Card {
            id: RecordId::generate(),
            cover: cover.to_string(),
            name: name.to_string(),
            description,
            stack_id: stack_id.clone(),
            created_at: state.next_created_at(),
        };
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn update_card(&self, id: &RecordId, update: CardUpdate) -> Result<Card> {
        self.round_trip().await?;
        let mut state = self.state.lock();
        let card = state
            .cards
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| Error::NotFound(format!("card {}", id)))?;
        update.apply_to(card);
        Ok(card.clone())
    }

    async fn delete_card(&self, id: &RecordId) -> Result<()> {
        self.round_trip().await?;
        self.state.lock().cards.retain(|c| &c.id != id);
        Ok(())
    }
}
