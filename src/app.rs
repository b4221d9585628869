//! Page bootstrap: wires each controller to its form when the form is present

use std::sync::Arc;

use tracing::info;

use crate::api::predictor::PredictionApi;
use crate::config::Config;
use crate::page::{ids, Document, Page};
use crate::services::{RangeAnalysisController, SingleCheckController};

pub struct App {
    pub config: Config,
    pub page: Page,
    pub single_check: Option<Arc<SingleCheckController>>,
    pub range_analysis: Option<Arc<RangeAnalysisController>>,
}

impl App {
    /// Build the page for the configured layout and attach controllers to its forms
    pub fn bootstrap(config: Config, api: Arc<dyn PredictionApi>) -> Self {
        let page = Page::new(Document::for_layout(config.page_layout));

        let single_check = page
            .read(|doc| doc.contains(ids::SINGLE_CHECK_FORM))
            .then(|| Arc::new(SingleCheckController::new(api.clone(), page.clone())));
        let range_analysis = page
            .read(|doc| doc.contains(ids::RANGE_ANALYSIS_FORM))
            .then(|| Arc::new(RangeAnalysisController::new(api.clone(), page.clone())));

        info!(
            "Page ready (single check: {}, range analysis: {})",
            single_check.is_some(),
            range_analysis.is_some()
        );

        Self {
            config,
            page,
            single_check,
            range_analysis,
        }
    }
}
