//! Element ids and class names shared with the page markup

pub const SINGLE_CHECK_FORM: &str = "singleTransactionForm";
pub const RANGE_ANALYSIS_FORM: &str = "rangeAnalysisForm";

pub const RESULT_BOX: &str = "result";
pub const RESULT_BOX_CLASS: &str = "result-box";

pub const ANALYZE_BUTTON: &str = "analyzeButton";
pub const ANALYZE_IDLE_LABEL: &str = "Analyze";
pub const ANALYZE_BUSY_LABEL: &str = "Analyzing...";

pub const STATS_CONTENT: &str = "statsContent";
pub const FIRST_TWO_TABLE: &str = "firstTwoTable";
pub const LAST_TWO_TABLE: &str = "lastTwoTable";
pub const LINE_CHART: &str = "lineChart";
pub const PIE_CHART: &str = "pieChart";

pub const STATS_SECTION: &str = "stats";
pub const SAMPLE_DATA_SECTION: &str = "sampleData";
pub const CHARTS_SECTION: &str = "charts";
/// Revealed and hidden together
pub const RESULT_SECTIONS: [&str; 3] = [STATS_SECTION, SAMPLE_DATA_SECTION, CHARTS_SECTION];

pub const HIDDEN_CLASS: &str = "hidden";
pub const FRAUD_STATUS_CLASS: &str = "fraud-status";
pub const SAFE_STATUS_CLASS: &str = "safe-status";
