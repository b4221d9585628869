pub mod chart_export_service;
pub mod range_analysis_service;
pub mod render_service;
pub mod single_check_service;

pub use range_analysis_service::RangeAnalysisController;
pub use single_check_service::SingleCheckController;
