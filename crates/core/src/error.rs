#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One or more registration fields failed validation. Messages are kept
    /// in check order so callers can report them verbatim.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}
