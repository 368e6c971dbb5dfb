/// Derived read-only views over the in-memory snapshot.
///
/// Pure functions, re-evaluated on every call; nothing here caches or
/// mutates. Ordering is the insertion order of the backing sequence.
use wishdeck_core::{Card, RecordId, Stack};

/// Cards belonging to one stack, in insertion order.
pub fn cards_in_stack(cards: &[Card], stack_id: &RecordId) -> Vec<Card> {
    cards
        .iter()
        .filter(|c| &c.stack_id == stack_id)
        .cloned()
        .collect()
}

/// Number of cards belonging to one stack.
pub fn card_count(cards: &[Card], stack_id: &RecordId) -> usize {
    cards.iter().filter(|c| &c.stack_id == stack_id).count()
}

/// Stacks whose name contains `query` as a case-insensitive
/// substring. An empty or whitespace-only query matches everything.
pub fn filter_stacks(stacks: &[Stack], query: &str) -> Vec<Stack> {
    let query = query.trim();
    if query.is_empty() {
        return stacks.to_vec();
    }
    let needle = query.to_lowercase();
    stacks
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
