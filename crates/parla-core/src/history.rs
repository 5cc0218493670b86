/// Undo/redo history of input text snapshots.
///
/// Always holds at least one snapshot and `cursor` always indexes into it.
#[derive(Debug, Clone)]
pub struct InputHistory {
    snapshots: Vec<String>,
    cursor: usize,
    limit: usize,
}

impl InputHistory {
    /// Starts with a single empty snapshot; `limit` is clamped to at least 1
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: vec![String::new()],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Drop any redo branch and append `text` as the newest snapshot
    pub fn commit(&mut self, text: String) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(text);
        self.cursor += 1;

        let overflow = self.snapshots.len().saturating_sub(self.limit);
        if overflow > 0 {
            self.snapshots.drain(..overflow);
            self.cursor -= overflow;
        }
    }

    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn current(&self) -> &str {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[String] {
        &self.snapshots
    }
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::new(100)
    }
}
