//! Shared context threaded through every pipeline step — the `Providers`
//! bundle SPEC_FULL's design notes replace ambient globals with (§9
//! "Global state → injected providers").

use std::sync::Arc;

use tdg_core::config::TrustDebtConfig;
use tdg_core::types::run::RunLayout;

use crate::classify::KeywordClassifier;
use crate::providers::CorpusProvider;

/// Everything a step needs besides its own artifact inputs: where to write,
/// what was configured, and the pluggable collaborators.
pub struct RunContext {
    pub layout: RunLayout,
    pub config: TrustDebtConfig,
    pub corpus: Arc<dyn CorpusProvider>,
    pub classifier: Arc<dyn KeywordClassifier>,
}

impl RunContext {
    pub fn new(
        layout: RunLayout,
        config: TrustDebtConfig,
        corpus: Arc<dyn CorpusProvider>,
        classifier: Arc<dyn KeywordClassifier>,
    ) -> Self {
        Self {
            layout,
            config,
            corpus,
            classifier,
        }
    }
}
