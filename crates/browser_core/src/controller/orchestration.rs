//! Transitions from user intents to fetch, store and render.

use std::sync::Arc;

use catalog_client::CatalogApi;
use shared::domain::{Phase, SearchTerm, ViewMode};
use tokio::{sync::Mutex, task::JoinSet};
use tracing::{debug, info, warn};

use super::state::{ControllerSnapshot, ControllerState, ListRequest};
use crate::{
    store::ResultStore,
    surface::{IntentReceiver, PaginationView, PresentationSurface, UiIntent},
};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub page_size: u32,
    /// Disable "next" once a list page comes back empty.
    pub stop_at_empty_page: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            stop_at_empty_page: false,
        }
    }
}

/// Owns pagination and mode, and is the only writer of the result store.
///
/// Every transition that fetches takes a fresh request generation under the state lock.
/// A completion only commits when its generation is still the latest, so overlapping
/// requests resolve to the most recently issued one regardless of arrival order.
pub struct Controller {
    catalog: Arc<dyn CatalogApi>,
    store: Arc<ResultStore>,
    surface: Arc<dyn PresentationSurface>,
    options: ControllerOptions,
    state: Mutex<ControllerState>,
}

impl Controller {
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        store: Arc<ResultStore>,
        surface: Arc<dyn PresentationSurface>,
        options: ControllerOptions,
    ) -> Arc<Self> {
        Arc::new(Self {
            catalog,
            store,
            surface,
            options,
            state: Mutex::new(ControllerState::new(options.page_size)),
        })
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Loads the first page. Errors are surfaced, never returned.
    pub async fn init(&self) {
        self.reload_list().await;
    }

    pub async fn handle(&self, intent: UiIntent) {
        match intent {
            UiIntent::Search(term) => self.search(term).await,
            UiIntent::NextPage => self.next_page().await,
            UiIntent::PreviousPage => self.previous_page().await,
            UiIntent::ReloadList => self.reload_list().await,
        }
    }

    /// Consumes intents until every sender is gone. Each intent runs as its own task so a slow
    /// fetch never blocks the next intent; outstanding transitions are drained before returning.
    pub async fn run(self: Arc<Self>, mut intents: IntentReceiver) {
        let mut inflight = JoinSet::new();
        while let Some(intent) = intents.recv().await {
            debug!(?intent, "browser: intent received");
            let controller = Arc::clone(&self);
            inflight.spawn(async move { controller.handle(intent).await });
            while let Some(result) = inflight.try_join_next() {
                log_join_failure(result);
            }
        }
        while let Some(result) = inflight.join_next().await {
            log_join_failure(result);
        }
    }

    pub async fn reload_list(&self) {
        let request = {
            let mut state = self.state.lock().await;
            self.begin_list_load(&mut state)
        };
        self.load_list(request).await;
    }

    pub async fn next_page(&self) {
        let request = {
            let mut state = self.state.lock().await;
            if state.mode != ViewMode::List {
                debug!("browser: next page ignored outside list mode");
                return;
            }
            if !state.next_enabled(self.options.stop_at_empty_page) {
                debug!(
                    page = state.cursor.current_page(),
                    "browser: next page ignored past the last known page"
                );
                return;
            }
            state.cursor.advance();
            self.begin_list_load(&mut state)
        };
        self.load_list(request).await;
    }

    pub async fn previous_page(&self) {
        let request = {
            let mut state = self.state.lock().await;
            if state.mode != ViewMode::List {
                debug!("browser: previous page ignored outside list mode");
                return;
            }
            if !state.cursor.retreat() {
                debug!("browser: already on the first page");
                return;
            }
            self.begin_list_load(&mut state)
        };
        self.load_list(request).await;
    }

    pub async fn search(&self, term: SearchTerm) {
        let generation = {
            let mut state = self.state.lock().await;
            state.mode = ViewMode::Search;
            let generation = state.begin();
            self.store.set(Vec::new()).await;
            self.surface.render_items(&[]);
            self.surface.update_pagination(PaginationView::hidden());
            self.surface.clear_error();
            self.surface.set_loading(true);
            generation
        };

        let result = self.catalog.fetch_by_key(term.as_str()).await;

        let mut state = self.state.lock().await;
        if !state.is_current(generation) {
            debug!(generation, key = %term, "browser: discarding stale search result");
            return;
        }
        match result {
            Ok(item) => {
                info!(key = %term, id = item.id.0, "browser: search resolved");
                self.store.set(vec![item]).await;
                state.phase = Phase::Success;
                self.surface.render_items(&self.store.get().await);
            }
            Err(err) => {
                warn!(
                    key = %term,
                    status = ?err.status(),
                    error = %err,
                    "browser: search failed"
                );
                state.phase = Phase::Error;
                self.surface.show_error(&err.user_message());
            }
        }
        self.surface.set_loading(false);
    }

    /// Takes a generation and raises the loading indicator while `state` is still locked,
    /// so a superseded transition can never touch the surface.
    fn begin_list_load(&self, state: &mut ControllerState) -> ListRequest {
        let request = state.begin_list_load();
        self.surface.clear_error();
        self.surface.set_loading(true);
        request
    }

    async fn load_list(&self, request: ListRequest) {
        let ListRequest { generation, cursor } = request;
        let page = cursor.current_page();
        let offset = cursor.offset();

        let result = self.catalog.fetch_page(cursor.page_size(), offset).await;

        let mut state = self.state.lock().await;
        if !state.is_current(generation) {
            debug!(generation, page, offset, "browser: discarding stale page");
            return;
        }
        match result {
            Ok(items) => {
                info!(page, offset, items = items.len(), "browser: page loaded");
                state.record_page_len(page, items.len());
                state.mode = ViewMode::List;
                state.phase = Phase::Success;
                let pagination = PaginationView::list(
                    &state.cursor,
                    state.next_enabled(self.options.stop_at_empty_page),
                );
                self.store.set(items).await;
                self.surface.render_items(&self.store.get().await);
                self.surface.update_pagination(pagination);
            }
            Err(err) => {
                warn!(
                    page,
                    offset,
                    status = ?err.status(),
                    error = %err,
                    "browser: page load failed"
                );
                state.phase = Phase::Error;
                self.surface.show_error(&err.user_message());
            }
        }
        self.surface.set_loading(false);
    }
}

fn log_join_failure(result: Result<(), tokio::task::JoinError>) {
    if let Err(err) = result {
        warn!(error = %err, "browser: transition task failed");
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
