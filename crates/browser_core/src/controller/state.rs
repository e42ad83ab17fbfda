//! Controller state and request generations.

use shared::domain::{PageCursor, Phase, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSnapshot {
    pub cursor: PageCursor,
    pub mode: ViewMode,
    pub phase: Phase,
}

/// A list load issued under the state lock: the page it targets and the generation it must
/// still hold when it completes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListRequest {
    pub generation: u64,
    pub cursor: PageCursor,
}

pub(crate) struct ControllerState {
    pub cursor: PageCursor,
    pub mode: ViewMode,
    pub phase: Phase,
    generation: u64,
    /// First page index that came back empty, if any.
    empty_page: Option<u32>,
}

impl ControllerState {
    pub fn new(page_size: u32) -> Self {
        Self {
            cursor: PageCursor::new(page_size),
            mode: ViewMode::List,
            phase: Phase::Idle,
            generation: 0,
            empty_page: None,
        }
    }

    /// Supersedes every request issued so far.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.generation
    }

    pub fn begin_list_load(&mut self) -> ListRequest {
        ListRequest {
            generation: self.begin(),
            cursor: self.cursor,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn record_page_len(&mut self, page: u32, len: usize) {
        if len == 0 {
            self.empty_page = Some(self.empty_page.map_or(page, |known| known.min(page)));
        } else if self.empty_page.is_some_and(|known| known <= page) {
            self.empty_page = None;
        }
    }

    pub fn next_enabled(&self, stop_at_empty_page: bool) -> bool {
        if !stop_at_empty_page {
            return true;
        }
        self.empty_page
            .map_or(true, |known| self.cursor.current_page() < known)
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            cursor: self.cursor,
            mode: self.mode,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut state = ControllerState::new(20);
        let first = state.begin();
        let second = state.begin();
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
        assert_eq!(state.phase, Phase::Loading);
    }

    #[test]
    fn empty_page_blocks_next_only_when_enabled() {
        let mut state = ControllerState::new(20);
        state.cursor.advance();
        state.record_page_len(1, 0);

        assert!(state.next_enabled(false));
        assert!(!state.next_enabled(true));

        state.cursor.retreat();
        assert!(state.next_enabled(true));
    }

    #[test]
    fn non_empty_page_at_known_end_clears_it() {
        let mut state = ControllerState::new(20);
        state.record_page_len(3, 0);
        state.record_page_len(3, 20);
        state.cursor.advance();
        state.cursor.advance();
        state.cursor.advance();
        assert!(state.next_enabled(true));
    }
}
