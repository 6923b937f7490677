/// Errors surfaced by the orchestrators.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The image could not be loaded; the screen has returned to input.
    ///
    /// Network, status and decode failures are not distinguished.
    #[error("Generation failed: {0}")]
    GenerationFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}
