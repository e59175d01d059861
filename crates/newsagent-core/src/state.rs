//! Load and save of the persisted conversation state.
//!
//! Both directions fail soft: a bad blob yields a fresh state, and a state
//! that cannot be encoded yields no blob so the host keeps the previous one.

use newsagent_types::state::ConversationState;

/// Decode a blob written by [`save_state`]. Absent or malformed input gives a
/// fresh, empty state.
pub fn load_state(blob: Option<&[u8]>) -> ConversationState {
    let Some(bytes) = blob else {
        return ConversationState::new();
    };
    match serde_json::from_slice::<ConversationState>(bytes) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Discarding unreadable conversation state ({} bytes): {}", bytes.len(), e);
            ConversationState::new()
        }
    }
}

/// Encode `state`. Output is stable for a given state.
pub fn save_state(state: &ConversationState) -> Option<Vec<u8>> {
    match serde_json::to_vec(state) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::error!(
                "Failed to serialize conversation {}: {}",
                state.conversation_id,
                e
            );
            None
        }
    }
}
