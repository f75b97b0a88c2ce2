mod machine;
mod state;

pub use machine::{BrowseMachine, LOAD_MORE_FAILED, SEARCH_FAILED, TRENDING_FAILED};
pub use state::{BrowseState, OperationKind, OperationStatus, OperationStatuses};
