use tracing::{debug, info, warn};

use crate::domain::controllers::{filter, pagination, sort, ValidationError};
use crate::domain::entities::record::{Dataset, Record};
use crate::domain::entities::schema::Schema;
use crate::domain::entities::view::{
    DisplayRow, Navigation, SortDirection, ViewPage, ViewState,
};
use crate::domain::pipeline::recompute;
use crate::domain::ranking::prepare_dataset;
use crate::usecase::ports::source::{DatasetSource, LoadError};
use crate::usecase::services::dataset_store::{Completion, DatasetStore, LoadTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Ready,
    Error(LoadError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer load was issued after this one.
    Stale,
    /// The session was torn down or the load was cancelled.
    Discarded,
}

/// Everything the presenter needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub rows: Vec<DisplayRow>,
    pub page_index: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub page_size: usize,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub filter_query: String,
    pub navigation: Navigation,
    pub loading: bool,
    pub error: Option<LoadError>,
}

/// One display session over a dataset: owns the view state, dispatches
/// controller calls and recomputes the page after every change.
#[derive(Debug)]
pub struct ViewSession {
    schema: Schema,
    store: DatasetStore,
    state: ViewState,
    page: ViewPage,
    phase: SessionPhase,
    torn_down: bool,
}

impl ViewSession {
    pub fn new(schema: Schema, page_size: usize) -> Self {
        let sort_field = schema.default_sort.clone();
        let direction = schema.default_direction_for(&sort_field);
        let state = ViewState::new(Some(sort_field), direction, page_size);
        Self {
            schema,
            store: DatasetStore::new(),
            state,
            page: ViewPage::default(),
            phase: SessionPhase::Loading,
            torn_down: false,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn page(&self) -> &ViewPage {
        &self.page
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn dataset(&self) -> &Dataset {
        self.store.dataset()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.store.begin();
        debug!(generation = ticket.generation(), "dataset load started");
        ticket
    }

    /// Applies the result of the load identified by `ticket`. Failures keep
    /// the last good dataset visible and move the session to `Error`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Record>, LoadError>,
    ) -> LoadOutcome {
        if self.torn_down {
            debug!(generation = ticket.generation(), "load finished after teardown");
            return LoadOutcome::Discarded;
        }

        match self.store.finish(ticket) {
            Completion::Current => {}
            Completion::Superseded => {
                debug!(generation = ticket.generation(), "stale load result dropped");
                return LoadOutcome::Stale;
            }
            Completion::NotPending => {
                debug!(generation = ticket.generation(), "cancelled load result dropped");
                return LoadOutcome::Discarded;
            }
        }

        match result {
            Ok(records) => {
                let dataset = prepare_dataset(records, &self.schema);
                info!(records = dataset.len(), "dataset loaded");
                self.store.replace(dataset);
                self.phase = SessionPhase::Ready;
                self.refresh();
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "dataset load failed");
                self.phase = SessionPhase::Error(err);
                self.refresh();
                LoadOutcome::Failed
            }
        }
    }

    /// Loads synchronously from `source`.
    pub fn load_from(&mut self, source: &dyn DatasetSource) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = source.load();
        self.complete_load(ticket, result)
    }

    pub fn set_query(&mut self, text: &str) {
        if self.torn_down {
            return;
        }
        filter::set_query(&mut self.state, text);
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    pub fn toggle_sort(&mut self, field: &str) {
        if self.torn_down {
            return;
        }
        let result = sort::toggle_sort(&mut self.state, &self.schema, field);
        self.after_update(result);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if self.torn_down {
            return;
        }
        let result = pagination::set_page_size(&mut self.state, page_size);
        self.after_update(result);
    }

    pub fn go_to(&mut self, page_index: usize) {
        if self.torn_down {
            return;
        }
        let result = pagination::go_to(&mut self.state, page_index, self.page.total_pages);
        self.after_update(result);
    }

    pub fn first_page(&mut self) {
        self.go_to(0);
    }

    pub fn prev_page(&mut self) {
        if let Some(target) = self.state.page_index.checked_sub(1) {
            self.go_to(target);
        }
    }

    pub fn next_page(&mut self) {
        self.go_to(self.state.page_index + 1);
    }

    pub fn last_page(&mut self) {
        self.go_to(self.page.total_pages.saturating_sub(1));
    }

    /// Detaches the session: pending loads are dropped and later calls are ignored.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.store.cancel();
        debug!("view session torn down");
    }

    pub fn view_model(&self) -> ViewModel {
        ViewModel {
            rows: self.page.rows.clone(),
            page_index: self.page.page_index,
            total_pages: self.page.total_pages,
            filtered_count: self.page.filtered_count,
            total_count: self.page.total_count,
            page_size: self.state.page_size,
            sort_field: self.state.sort_field.clone(),
            sort_direction: self.state.sort_direction,
            filter_query: self.state.filter_query.clone(),
            navigation: self.page.navigation,
            loading: self.store.is_loading(),
            error: match &self.phase {
                SessionPhase::Error(err) => Some(err.clone()),
                _ => None,
            },
        }
    }

    fn after_update(&mut self, result: Result<(), ValidationError>) {
        match result {
            Ok(()) => self.refresh(),
            Err(err) => debug!(error = %err, "ignored view update"),
        }
    }

    fn refresh(&mut self) {
        self.page = recompute(self.store.dataset(), &self.schema, &self.state);
        pagination::clamp(&mut self.state, self.page.filtered_count);
    }
}
