use crate::domain::entities::record::Dataset;

/// Identifies one issued load. Only the most recently issued ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Current,
    Superseded,
    NotPending,
}

/// Holds the last successfully loaded dataset and the in-flight load, if any.
#[derive(Debug, Default)]
pub struct DatasetStore {
    dataset: Dataset,
    issued: u64,
    pending: Option<u64>,
    loaded_once: bool,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded_once
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Issues a new ticket; any older in-flight ticket is superseded.
    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        LoadTicket(self.issued)
    }

    /// Marks `ticket` as finished if it is the current one.
    pub fn finish(&mut self, ticket: LoadTicket) -> Completion {
        match self.pending {
            Some(current) if current == ticket.0 => {
                self.pending = None;
                Completion::Current
            }
            Some(_) => Completion::Superseded,
            None if ticket.0 < self.issued => Completion::Superseded,
            None => Completion::NotPending,
        }
    }

    /// Swaps in a fully built dataset. Readers see either the old or the new one.
    pub fn replace(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.loaded_once = true;
    }

    /// Drops the in-flight load so its completion is ignored.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
