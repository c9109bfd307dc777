use crate::domain::ExecutionToken;

/// Port resolving the human-readable name of the current run.
pub trait ExecutionNameResolver {
    /// `None` when the name cannot be resolved; never an error.
    fn execution_name(&self, token: &ExecutionToken) -> Option<String>;
}
