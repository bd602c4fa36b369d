use std::sync::{Arc, RwLock};

/// Shared command sequence: written by the prompt path, read every tick by
/// the drain loop. Writes swap the whole sequence reference; entries are
/// never mutated in place, so readers holding a snapshot are unaffected by
/// a concurrent replace.
#[derive(Debug, Default)]
pub struct CommandQueue {
    inner: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    commands: Arc<[String]>,
    cursor: usize,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current sequence wholesale. A partially drained prior
    /// sequence is abandoned and the drain cursor resets.
    pub fn set(&self, commands: Vec<String>) {
        let mut state = self.inner.write().expect("queue lock poisoned");
        state.commands = commands.into();
        state.cursor = 0;
    }

    /// Reset to empty, regardless of prior contents.
    pub fn cancel(&self) {
        let mut state = self.inner.write().expect("queue lock poisoned");
        state.commands = Vec::new().into();
        state.cursor = 0;
    }

    /// The current sequence by reference, for the tick loop's re-iteration.
    pub fn snapshot(&self) -> Arc<[String]> {
        self.inner.read().expect("queue lock poisoned").commands.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("queue lock poisoned").commands.is_empty()
    }

    /// One-shot consumption surface: advance the cursor past empty entries
    /// and yield the next command. Independent of `snapshot` — the tick
    /// loop's re-iteration does not move the cursor.
    pub fn drain_next(&self) -> Option<String> {
        let mut state = self.inner.write().expect("queue lock poisoned");
        while state.cursor < state.commands.len() {
            let i = state.cursor;
            state.cursor += 1;
            if !state.commands[i].is_empty() {
                return Some(state.commands[i].clone());
            }
        }
        None
    }
}
