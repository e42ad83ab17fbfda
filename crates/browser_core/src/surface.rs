//! Presentation boundary: what the controller can command, and the intents a surface emits.

use shared::domain::{Item, PageCursor, SearchTerm};
use tokio::sync::mpsc;

/// Visible state of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub visible: bool,
    /// 1-based.
    pub page_label: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationView {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            page_label: 0,
            previous_enabled: false,
            next_enabled: false,
        }
    }

    pub fn list(cursor: &PageCursor, next_enabled: bool) -> Self {
        Self {
            visible: true,
            page_label: cursor.page_label(),
            previous_enabled: cursor.current_page() > 0,
            next_enabled,
        }
    }
}

/// A rendering target driven by the controller. Implementations hold no business state.
pub trait PresentationSurface: Send + Sync {
    fn render_items(&self, items: &[Item]);
    fn set_loading(&self, loading: bool);
    fn show_error(&self, message: &str);
    fn clear_error(&self);
    fn show_validation(&self, message: &str);
    fn update_pagination(&self, pagination: PaginationView);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    Search(SearchTerm),
    NextPage,
    PreviousPage,
    ReloadList,
}

/// Surface side of the intent channel.
#[derive(Clone)]
pub struct IntentSender {
    tx: mpsc::UnboundedSender<UiIntent>,
}

/// Controller side of the intent channel. There is exactly one.
pub struct IntentReceiver {
    rx: mpsc::UnboundedReceiver<UiIntent>,
}

pub fn intent_channel() -> (IntentSender, IntentReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IntentSender { tx }, IntentReceiver { rx })
}

impl IntentSender {
    /// Validates raw search input. Blank input is reported on `surface` and never sent.
    pub fn submit_search(&self, surface: &dyn PresentationSurface, raw: &str) -> bool {
        match SearchTerm::parse(raw) {
            Ok(term) => self.send(UiIntent::Search(term)),
            Err(err) => {
                surface.show_validation(&err.to_string());
                false
            }
        }
    }

    pub fn next_page(&self) -> bool {
        self.send(UiIntent::NextPage)
    }

    pub fn previous_page(&self) -> bool {
        self.send(UiIntent::PreviousPage)
    }

    pub fn reload_list(&self) -> bool {
        self.send(UiIntent::ReloadList)
    }

    fn send(&self, intent: UiIntent) -> bool {
        if self.tx.send(intent).is_err() {
            tracing::debug!("intent dropped: controller no longer listening");
            return false;
        }
        true
    }
}

impl IntentReceiver {
    pub async fn recv(&mut self) -> Option<UiIntent> {
        self.rx.recv().await
    }
}
