/// Optimistic synchronization engine.
///
/// Owns the authoritative in-memory snapshot of stacks and cards.
/// Every mutation applies to memory immediately, then reconciles
/// against the remote service: on confirmation the temporary record is
/// promoted (or the applied state kept) and persisted to the local
/// store; on failure the exact pre-mutation state is restored. No
/// failure propagates past the engine boundary; callers observe it
/// through `sync_status` and `last_error` and the reverted snapshot.
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use wishdeck_core::{
    Card, CardUpdate, Cover, Error, LocalStore, RecordId, Stack, StackUpdate,
};
use wishdeck_remote::RemoteService;

use crate::query;

/// Engine-wide reconciliation state.
///
/// A single flag shared by all in-flight mutations: it flips to
/// `Syncing` when an optimistic change is applied and to `Idle` or
/// `Error` when a reconciliation finishes. Overlapping mutations race
/// on it and the last reconciliation to complete wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Syncing,
    Error,
}

#[derive(Debug, Default)]
struct Snapshot {
    stacks: Vec<Stack>,
    cards: Vec<Card>,
}

/// The synchronization engine. Constructed once (see `EngineBuilder`)
/// and handed to collaborators; it is the only writer of both the
/// in-memory snapshot and the durable local store.
pub struct SyncEngine {
    remote: Arc<dyn RemoteService>,
    store: LocalStore,
    snapshot: RwLock<Snapshot>,
    status: RwLock<SyncStatus>,
    last_error: RwLock<Option<String>>,
    loading: RwLock<bool>,
    search_query: RwLock<String>,
}

impl SyncEngine {
    /// Create an engine seeded from the local store, before any remote
    /// call is made.
    pub fn new(store: LocalStore, remote: Arc<dyn RemoteService>) -> Self {
        let snapshot = Snapshot {
            stacks: store.stacks(),
            cards: store.cards(),
        };
        Self {
            remote,
            store,
            snapshot: RwLock::new(snapshot),
            status: RwLock::new(SyncStatus::Idle),
            last_error: RwLock::new(None),
            loading: RwLock::new(false),
            search_query: RwLock::new(String::new()),
        }
    }

    // ---- Observables ----

    pub fn sync_status(&self) -> SyncStatus {
        *self.status.read()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.read()
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        *self.search_query.write() = query.into();
    }

    pub fn search_query(&self) -> String {
        self.search_query.read().clone()
    }

    // ---- Queries (synchronous, current in-memory state) ----

    pub fn stacks(&self) -> Vec<Stack> {
        self.snapshot.read().stacks.clone()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.snapshot.read().cards.clone()
    }

    pub fn cards_in_stack(&self, stack_id: &RecordId) -> Vec<Card> {
        query::cards_in_stack(&self.snapshot.read().cards, stack_id)
    }

    pub fn card_count(&self, stack_id: &RecordId) -> usize {
        query::card_count(&self.snapshot.read().cards, stack_id)
    }

    /// Stacks filtered by the current search query.
    pub fn filtered_stacks(&self) -> Vec<Stack> {
        let query = self.search_query();
        query::filter_stacks(&self.snapshot.read().stacks, &query)
    }

    // ---- List loads ----

    /// Load stacks: local store first, then the authoritative remote
    /// list. A remote failure keeps whatever the store provided and is
    /// only surfaced when nothing was loaded at all.
    pub async fn load_stacks(&self) {
        *self.loading.write() = true;
        *self.last_error.write() = None;

        let local = self.store.stacks();
        let had_local = !local.is_empty();
        if had_local {
            self.snapshot.write().stacks = local;
        }

        match self.remote.list_stacks().await {
            Ok(stacks) => {
                debug!(count = stacks.len(), "loaded stacks from remote");
                self.snapshot.write().stacks = stacks;
                self.persist_stacks();
            }
            Err(e) => {
                warn!(error = %e, "remote stack list failed, keeping local data");
                if !had_local {
                    *self.last_error.write() = Some(e.to_string());
                }
            }
        }
        *self.loading.write() = false;
    }

    /// Load cards, optionally scoped to one stack. Scoped merges keep
    /// the in-memory cards of other stacks untouched and replace the
    /// requested stack's cards with the remote result; an unscoped
    /// load replaces the whole collection.
    pub async fn load_cards(&self, scope: Option<&RecordId>) {
        *self.loading.write() = true;
        *self.last_error.write() = None;

        let local = self.store.cards();
        let had_local = match scope {
            Some(id) => local.iter().any(|c| &c.stack_id == id),
            None => !local.is_empty(),
        };
        if !local.is_empty() || scope.is_none() {
            self.snapshot.write().cards = local;
        }

        match self.remote.list_cards(scope).await {
            Ok(remote_cards) => {
                debug!(count = remote_cards.len(), scoped = scope.is_some(), "loaded cards from remote");
                {
                    let mut snap = self.snapshot.write();
                    match scope {
                        Some(id) => {
                            snap.cards.retain(|c| &c.stack_id != id);
                            snap.cards.extend(remote_cards);
                        }
                        None => snap.cards = remote_cards,
                    }
                }
                self.persist_cards();
            }
            Err(e) => {
                warn!(error = %e, "remote card list failed, keeping local data");
                if !had_local {
                    *self.last_error.write() = Some(e.to_string());
                }
            }
        }
        *self.loading.write() = false;
    }

    // ---- Stack mutations ----

    /// Create a stack optimistically. A missing cover is synthesized
    /// from the gradient palette; the temporary record is promoted in
    /// place once the remote confirms, or retracted on failure.
    pub async fn create_stack(&self, name: impl Into<String>, cover: Option<Cover>) {
        let name = name.into();
        let cover = cover.unwrap_or_else(Cover::random_gradient);
        let optimistic = Stack::optimistic(name.clone(), cover.clone());
        let temp_id = optimistic.id.clone();

        self.snapshot.write().stacks.push(optimistic);
        self.begin();
        debug!(temp_id = %temp_id, %name, "create stack (optimistic)");

        match self.remote.create_stack(&name, cover).await {
            Ok(confirmed) => {
                {
                    let mut snap = self.snapshot.write();
                    for stack in snap.stacks.iter_mut() {
                        if stack.id == temp_id {
                            *stack = confirmed.clone();
                        }
                    }
                }
                self.persist_stacks();
                self.confirm();
            }
            Err(e) => {
                self.snapshot.write().stacks.retain(|s| s.id != temp_id);
                self.fail("create stack", &e);
            }
        }
    }

    /// Update a stack in place. No-op if the id is unknown. The cover
    /// can never be cleared: an update that omits it retains the
    /// existing one.
    pub async fn update_stack(&self, id: &RecordId, update: StackUpdate) {
        let original = self
            .snapshot
            .read()
            .stacks
            .iter()
            .find(|s| &s.id == id)
            .cloned();
        let Some(original) = original else {
            return;
        };

        {
            let mut snap = self.snapshot.write();
            if let Some(stack) = snap.stacks.iter_mut().find(|s| &s.id == id) {
                update.apply_to(stack);
            }
        }
        self.begin();
        debug!(id = %id, "update stack (optimistic)");

        match self.remote.update_stack(id, update).await {
            Ok(_) => {
                self.persist_stacks();
                self.confirm();
            }
            Err(e) => {
                {
                    let mut snap = self.snapshot.write();
                    if let Some(stack) = snap.stacks.iter_mut().find(|s| &s.id == id) {
                        *stack = original.clone();
                    }
                }
                self.persist_stacks();
                self.fail("update stack", &e);
            }
        }
    }

    /// Delete a stack and, atomically with it, every card it owns. A
    /// failed delete restores the stack (stacks re-sorted by creation
    /// time) and all of its cards.
    pub async fn delete_stack(&self, id: &RecordId) {
        let (removed_stack, removed_cards) = {
            let snap = self.snapshot.read();
            (
                snap.stacks.iter().find(|s| &s.id == id).cloned(),
                query::cards_in_stack(&snap.cards, id),
            )
        };

        {
            let mut snap = self.snapshot.write();
            snap.stacks.retain(|s| &s.id != id);
            snap.cards.retain(|c| &c.stack_id != id);
        }
        self.begin();
        debug!(id = %id, cascade = removed_cards.len(), "delete stack (optimistic)");

        match self.remote.delete_stack(id).await {
            Ok(()) => {
                self.persist_stacks();
                self.persist_cards();
                self.confirm();
            }
            Err(e) => {
                {
                    let mut snap = self.snapshot.write();
                    if let Some(stack) = removed_stack {
                        snap.stacks.push(stack);
                        snap.stacks.sort_by_key(|s| s.created_at);
                    }
                    snap.cards.extend(removed_cards);
                }
                self.persist_stacks();
                self.persist_cards();
                self.fail("delete stack", &e);
            }
        }
    }

    // ---- Card mutations ----

    /// Create a card optimistically under `stack_id`; same temporary
    /// identifier pattern as `create_stack`.
    pub async fn create_card(
        &self,
        cover: &str,
        name: &str,
        description: Option<String>,
        stack_id: &RecordId,
    ) {
        let optimistic = Card::optimistic(cover, name, description.clone(), stack_id.clone());
        let temp_id = optimistic.id.clone();

        self.snapshot.write().cards.push(optimistic);
        self.begin();
        debug!(temp_id = %temp_id, name, "create card (optimistic)");

        match self.remote.create_card(cover, name, description, stack_id).await {
            Ok(confirmed) => {
                {
                    let mut snap = self.snapshot.write();
                    for card in snap.cards.iter_mut() {
                        if card.id == temp_id {
                            *card = confirmed.clone();
                        }
                    }
                }
                self.persist_cards();
                self.confirm();
            }
            Err(e) => {
                self.snapshot.write().cards.retain(|c| c.id != temp_id);
                self.fail("create card", &e);
            }
        }
    }

    /// Update a card in place. No-op if the id is unknown.
    pub async fn update_card(&self, id: &RecordId, update: CardUpdate) {
        let original = self
            .snapshot
            .read()
            .cards
            .iter()
            .find(|c| &c.id == id)
            .cloned();
        let Some(original) = original else {
            return;
        };

        {
            let mut snap = self.snapshot.write();
            if let Some(card) = snap.cards.iter_mut().find(|c| &c.id == id) {
                update.apply_to(card);
            }
        }
        self.begin();
        debug!(id = %id, "update card (optimistic)");

        match self.remote.update_card(id, update).await {
            Ok(_) => {
                self.persist_cards();
                self.confirm();
            }
            Err(e) => {
                {
                    let mut snap = self.snapshot.write();
                    if let Some(card) = snap.cards.iter_mut().find(|c| &c.id == id) {
                        *card = original.clone();
                    }
                }
                self.persist_cards();
                self.fail("update card", &e);
            }
        }
    }

    /// Delete a card; a failed delete reinserts it sorted by creation
    /// time.
    pub async fn delete_card(&self, id: &RecordId) {
        let removed = self
            .snapshot
            .read()
            .cards
            .iter()
            .find(|c| &c.id == id)
            .cloned();

        self.snapshot.write().cards.retain(|c| &c.id != id);
        self.begin();
        debug!(id = %id, "delete card (optimistic)");

        match self.remote.delete_card(id).await {
            Ok(()) => {
                self.persist_cards();
                self.confirm();
            }
            Err(e) => {
                {
                    let mut snap = self.snapshot.write();
                    if let Some(card) = removed {
                        snap.cards.push(card);
                        snap.cards.sort_by_key(|c| c.created_at);
                    }
                }
                self.persist_cards();
                self.fail("delete card", &e);
            }
        }
    }

    /// Move a card to another stack.
    pub async fn move_card(&self, id: &RecordId, new_stack_id: &RecordId) {
        self.update_card(id, CardUpdate::new().with_stack(new_stack_id.clone()))
            .await;
    }

    /// Copy a card into another stack: a new card with the source's
    /// cover, name, and description, under a fresh identifier and its
    /// own optimistic lifecycle. No-op if the source is unknown.
    pub async fn copy_card(&self, id: &RecordId, new_stack_id: &RecordId) {
        let source = self
            .snapshot
            .read()
            .cards
            .iter()
            .find(|c| &c.id == id)
            .cloned();
        let Some(source) = source else {
            return;
        };
        self.create_card(
            &source.cover,
            &source.name,
            source.description.clone(),
            new_stack_id,
        )
        .await;
    }

    // ---- Reconciliation state ----

    fn begin(&self) {
        *self.status.write() = SyncStatus::Syncing;
    }

    fn confirm(&self) {
        *self.status.write() = SyncStatus::Idle;
    }

    fn fail(&self, op: &str, error: &Error) {
        warn!(op, error = %error, "mutation rolled back");
        *self.last_error.write() = Some(error.to_string());
        *self.status.write() = SyncStatus::Error;
    }

    fn persist_stacks(&self) {
        let stacks = self.snapshot.read().stacks.clone();
        self.store.save_stacks(&stacks);
    }

    fn persist_cards(&self) {
        let cards = self.snapshot.read().cards.clone();
        self.store.save_cards(&cards);
    }
}
