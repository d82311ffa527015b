pub mod dataset_store;
pub mod quiz_history;
pub mod view_session;
