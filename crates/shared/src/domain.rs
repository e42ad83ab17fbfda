use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ItemId);

/// One catalog record as the browser consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    /// Decimetres, as reported by the remote.
    pub height: u32,
    /// Hectograms, as reported by the remote.
    pub weight: u32,
    pub image_url: Option<String>,
}

/// Pagination position over the remote listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page_size: u32,
    current_page: u32,
}

impl PageCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            current_page: 0,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.current_page) * u64::from(self.page_size)
    }

    /// 1-based page number for display.
    pub fn page_label(&self) -> u32 {
        self.current_page.saturating_add(1)
    }

    pub fn advance(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Steps back one page. Returns `false` (and leaves the cursor alone) on the first page.
    pub fn retreat(&mut self) -> bool {
        if self.current_page == 0 {
            return false;
        }
        self.current_page -= 1;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchTermError {
    #[error("Type a name or number to search.")]
    Empty,
}

/// A validated search key: trimmed, lowercased and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: &str) -> Result<Self, SearchTermError> {
        let term = raw.trim().to_lowercase();
        if term.is_empty() {
            return Err(SearchTermError::Empty);
        }
        Ok(Self(term))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
