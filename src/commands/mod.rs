//! Line-oriented page events for the terminal shell

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::app::App;
use crate::page::{snapshot, Page};
use crate::services::chart_export_service;

pub const HELP_TEXT: &str = "\
Commands:
  single <merchant_id> <amount>      check one transaction
  range <start_date> <end_date>      analyze a date range (YYYY-MM-DD)
  show                               print the page
  export                             save the visible charts as PNG files
  help                               this text
  quit                               leave once pending requests settle";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SingleCheck { merchant_id: String, amount: String },
    RangeAnalysis { start_date: String, end_date: String },
    Show,
    ExportCharts,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("this page has no {0} form")]
    FormMissing(&'static str),
    #[error(transparent)]
    Export(#[from] chart_export_service::ExportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// Missing form fields become empty strings so the form's own validation
/// decides what to tell the user.
pub fn parse_event(line: &str) -> Result<Option<PageEvent>, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return Ok(None);
    };
    let arg = |i: usize| args.get(i).copied().unwrap_or_default().to_string();

    let event = match command.to_lowercase().as_str() {
        "single" | "check" => PageEvent::SingleCheck {
            merchant_id: arg(0),
            amount: arg(1),
        },
        "range" | "analyze" => PageEvent::RangeAnalysis {
            start_date: arg(0),
            end_date: arg(1),
        },
        "show" => PageEvent::Show,
        "export" => PageEvent::ExportCharts,
        "help" => PageEvent::Help,
        "quit" | "exit" => PageEvent::Quit,
        _ => return Err(CommandError::Unknown(command.to_string())),
    };

    Ok(Some(event))
}

/// Page text plus any alerts raised since the last print
pub fn take_page_output(page: &Page) -> String {
    page.update(|doc| {
        let mut out = String::new();
        for alert in doc.take_alerts() {
            out.push_str(&format!("[alert] {}\n", alert));
        }
        out.push_str(&snapshot::render_text(doc));
        out
    })
}

fn print_page(page: &Page) {
    println!("{}", take_page_output(page));
}

/// Apply one event to the page.
///
/// Submissions run their synchronous half here; the network half is pushed
/// onto `tasks` and prints the page when it settles. Nothing stops a second
/// submission while the first is still pending.
pub fn handle_event(
    app: &App,
    event: PageEvent,
    tasks: &mut JoinSet<()>,
) -> Result<Flow, CommandError> {
    match event {
        PageEvent::SingleCheck { merchant_id, amount } => {
            let controller = app
                .single_check
                .clone()
                .ok_or(CommandError::FormMissing("single transaction"))?;

            match controller.prepare(&merchant_id, &amount) {
                Some(request) => {
                    let page = app.page.clone();
                    tasks.spawn(async move {
                        controller.dispatch(request).await;
                        print_page(&page);
                    });
                }
                None => print_page(&app.page),
            }
        }
        PageEvent::RangeAnalysis { start_date, end_date } => {
            let controller = app
                .range_analysis
                .clone()
                .ok_or(CommandError::FormMissing("transaction range"))?;

            let prepared = controller.prepare(&start_date, &end_date);
            print_page(&app.page);
            if let Some(request) = prepared {
                let page = app.page.clone();
                tasks.spawn(async move {
                    controller.dispatch(request).await;
                    print_page(&page);
                });
            }
        }
        PageEvent::Show => print_page(&app.page),
        PageEvent::ExportCharts => {
            let doc = app.page.snapshot();
            let written = chart_export_service::export_charts(&doc, &app.config.chart_dir)?;
            if written.is_empty() {
                warn!("No visible charts to export");
                println!("No charts on the page yet.");
            }
            for path in written {
                println!("Saved {}", path.display());
            }
        }
        PageEvent::Help => println!("{}", HELP_TEXT),
        PageEvent::Quit => {
            info!("Quit requested, {} request(s) still pending", tasks.len());
            return Ok(Flow::Quit);
        }
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::models::{RangeAnalysisResult, RangeOutcome};
    use crate::page::{ids, PageLayout};
    use crate::test_support::ScriptedApi;

    #[test]
    fn test_parse_events() {
        assert_eq!(parse_event("   ").unwrap(), None);
        assert_eq!(
            parse_event("single M42 19.99").unwrap(),
            Some(PageEvent::SingleCheck {
                merchant_id: "M42".to_string(),
                amount: "19.99".to_string()
            })
        );
        assert_eq!(
            parse_event("RANGE 2024-01-01").unwrap(),
            Some(PageEvent::RangeAnalysis {
                start_date: "2024-01-01".to_string(),
                end_date: String::new()
            })
        );
        assert_eq!(parse_event("quit").unwrap(), Some(PageEvent::Quit));
        assert!(matches!(parse_event("$ping"), Err(CommandError::Unknown(_))));
    }

    #[tokio::test]
    async fn test_missing_form_is_reported() {
        let config = Config {
            page_layout: PageLayout::SingleTransaction,
            ..Config::default()
        };
        let app = App::bootstrap(config, Arc::new(ScriptedApi::new()));
        let mut tasks = JoinSet::new();

        let err = handle_event(
            &app,
            PageEvent::RangeAnalysis {
                start_date: "2024-01-01".to_string(),
                end_date: "2024-01-02".to_string(),
            },
            &mut tasks,
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::FormMissing(_)));
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_range_event_runs_in_background() {
        let api = Arc::new(ScriptedApi::new());
        api.push_range(Ok(RangeOutcome::Analysis(RangeAnalysisResult {
            total_transactions: 4,
            fraud_transactions: 1,
            accuracy: 75.0,
            first_two: Vec::new(),
            last_two: Vec::new(),
            line_chart: None,
            pie_chart: None,
        })));
        let app = App::bootstrap(Config::default(), api.clone());
        let mut tasks = JoinSet::new();

        let event = parse_event("range 2024-01-01 2024-01-31").unwrap().unwrap();
        assert_eq!(handle_event(&app, event, &mut tasks).unwrap(), Flow::Continue);
        assert_eq!(
            app.page.read(|doc| doc.element(ids::ANALYZE_BUTTON).unwrap().disabled),
            true
        );

        while let Some(joined) = tasks.join_next().await {
            joined.unwrap();
        }

        assert_eq!(api.range_calls(), 1);
        app.page.read(|doc| {
            assert!(!doc.element(ids::ANALYZE_BUTTON).unwrap().disabled);
            assert!(doc.element(ids::STATS_CONTENT).unwrap().text.contains("Total Transactions: 4"));
        });
    }

    #[tokio::test]
    async fn test_invalid_single_event_renders_inline() {
        let api = Arc::new(ScriptedApi::new());
        let app = App::bootstrap(Config::default(), api.clone());
        let mut tasks = JoinSet::new();

        let event = parse_event("single").unwrap().unwrap();
        handle_event(&app, event, &mut tasks).unwrap();

        assert!(tasks.is_empty());
        assert_eq!(api.single_calls(), 0);
        let output = take_page_output(&app.page);
        assert!(output.contains("Please enter both Merchant ID and Amount"));
    }

    #[test]
    fn test_output_includes_new_alerts_once() {
        let page = Page::new(crate::page::Document::for_layout(PageLayout::TransactionRange));
        page.update(|doc| doc.alert("Start date must be before end date"));

        assert!(take_page_output(&page).starts_with("[alert] Start date must be before end date\n"));
        assert!(!take_page_output(&page).contains("[alert]"));
    }
}
