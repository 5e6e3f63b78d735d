//! History windowing.

use gamemaster_core::message::Turn;

/// Turns of recent history sent with every play turn.
pub const PLAY_WINDOW_TURNS: usize = 18;

/// Turns of recent history used to build a resume recap.
pub const RECAP_WINDOW_TURNS: usize = 6;

/// Returns the bounded view of `transcript` sent to the model.
///
/// A transcript of at most `max_turns + 1` entries is returned unchanged.
/// Longer transcripts keep entry 0 (the narrator instruction) followed by the
/// last `max_turns` entries. The transcript itself is never modified.
#[must_use]
pub fn window(transcript: &[Turn], max_turns: usize) -> Vec<Turn> {
    if transcript.len() <= max_turns.saturating_add(1) {
        return transcript.to_vec();
    }
    let mut bounded = Vec::with_capacity(max_turns + 1);
    bounded.push(transcript[0].clone());
    bounded.extend_from_slice(&transcript[transcript.len() - max_turns..]);
    bounded
}
