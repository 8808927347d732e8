use std::sync::Arc;

use crate::analysis::extractor::ResumeTextExtractor;
use crate::llm_client::ChatCompleter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Storage-to-text pipeline for uploaded resume PDFs.
    pub extractor: Arc<ResumeTextExtractor>,
    /// Chat-completion capability. `Arc<dyn …>` so tests swap in a fake.
    pub llm: Arc<dyn ChatCompleter>,
}
