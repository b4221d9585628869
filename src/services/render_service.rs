//! Stateless rendering of backend results into the page.
//!
//! Every function takes the document and the target element id explicitly,
//! and calling it twice with the same input leaves the same page behind.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Category, RangeAnalysisResult, TransactionRow};
use crate::page::{ids, Cell, Display, Document, RenderError, TableRow};

const MISSING_TEXT: &str = "N/A";
const MISSING_AMOUNT: &str = "0.00";

/// Show `message` in the verdict box styled for `category`
pub fn render_verdict(
    doc: &mut Document,
    target: &str,
    message: &str,
    category: Category,
) -> Result<(), RenderError> {
    let element = doc.element_mut(target)?;
    element.text = message.to_string();
    element.set_classes([ids::RESULT_BOX_CLASS, category.css_class()]);
    Ok(())
}

pub fn render_statistics(
    doc: &mut Document,
    target: &str,
    result: &RangeAnalysisResult,
) -> Result<(), RenderError> {
    let element = doc.element_mut(target)?;
    element.text = format!(
        "Total Transactions: {}\nFraudulent Transactions: {}\nDetection Accuracy: {}%",
        result.total_transactions, result.fraud_transactions, result.accuracy
    );
    Ok(())
}

/// Replace the body of `table_id` with one row per transaction, in order
pub fn render_table(
    doc: &mut Document,
    table_id: &str,
    rows: &[TransactionRow],
) -> Result<(), RenderError> {
    let element = doc.element_mut(table_id)?;
    element.rows = rows.iter().map(transaction_cells).collect();
    Ok(())
}

fn transaction_cells(row: &TransactionRow) -> TableRow {
    let text = |value: &Option<String>| match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING_TEXT.to_string(),
    };

    let amount = row
        .amount
        .map(format_amount)
        .unwrap_or_else(|| MISSING_AMOUNT.to_string());

    let status = if row.is_fraud() {
        Cell::styled("Fraud", ids::FRAUD_STATUS_CLASS)
    } else {
        Cell::styled("Safe", ids::SAFE_STATUS_CLASS)
    };

    TableRow {
        cells: vec![
            Cell::plain(text(&row.merchant_id)),
            Cell::plain(text(&row.first_name)),
            Cell::plain(text(&row.last_name)),
            Cell::plain(amount),
            status,
        ],
    }
}

/// Two decimal places, with exact halfway values rounded away from zero
fn format_amount(amount: f64) -> String {
    match Decimal::from_f64_retain(amount) {
        Some(exact) => format!(
            "{:.2}",
            exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => format!("{:.2}", amount),
    }
}

/// Swap in a base64 PNG, or hide the image when the backend sent none
pub fn render_chart(
    doc: &mut Document,
    chart_id: &str,
    base64_png: Option<&str>,
) -> Result<(), RenderError> {
    let element = doc.element_mut(chart_id)?;
    match base64_png {
        Some(data) if !data.is_empty() => {
            element.src = Some(format!("data:image/png;base64,{}", data));
            element.display = Display::Block;
        }
        _ => element.display = Display::None,
    }
    Ok(())
}

/// Show or hide the statistics, sample data and chart sections together.
/// Sections missing from the page are skipped.
pub fn set_sections_visible(doc: &mut Document, show: bool) {
    for section in ids::RESULT_SECTIONS {
        if let Ok(element) = doc.element_mut(section) {
            if show {
                element.remove_class(ids::HIDDEN_CLASS);
            } else {
                element.add_class(ids::HIDDEN_CLASS);
            }
        }
    }
}

/// Put the analyze button into its busy or idle state
pub fn render_submit_button(doc: &mut Document, button_id: &str, busy: bool) -> Result<(), RenderError> {
    let element = doc.element_mut(button_id)?;
    element.disabled = busy;
    element.text = if busy {
        ids::ANALYZE_BUSY_LABEL
    } else {
        ids::ANALYZE_IDLE_LABEL
    }
    .to_string();
    Ok(())
}

/// Render a full analysis and reveal its sections.
///
/// Work happens on a staged copy that replaces the document only once every
/// part rendered, so a failure leaves the page exactly as it was.
pub fn render_analysis(doc: &mut Document, result: &RangeAnalysisResult) -> Result<(), RenderError> {
    let mut staged = doc.clone();

    render_statistics(&mut staged, ids::STATS_CONTENT, result)?;
    render_table(&mut staged, ids::FIRST_TWO_TABLE, &result.first_two)?;
    render_table(&mut staged, ids::LAST_TWO_TABLE, &result.last_two)?;
    render_chart(&mut staged, ids::LINE_CHART, result.line_chart.as_deref())?;
    render_chart(&mut staged, ids::PIE_CHART, result.pie_chart.as_deref())?;
    set_sections_visible(&mut staged, true);

    *doc = staged;
    Ok(())
}
