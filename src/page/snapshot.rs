//! Plain-text rendering of the page for the terminal shell

use std::fmt::Write;

use super::{ids, Document, Element};
use crate::utils::Table;

/// Render every part of the page that is present in the document
pub fn render_text(doc: &Document) -> String {
    let mut out = String::new();

    if let Some(result) = doc.element(ids::RESULT_BOX) {
        let classes: Vec<&str> = result.classes().collect();
        let _ = writeln!(out, "== Single Transaction ==");
        if result.text.is_empty() {
            let _ = writeln!(out, "(no result)");
        } else {
            let _ = writeln!(out, "[{}] {}", classes.join(" "), result.text);
        }
    }

    if let Some(button) = doc.element(ids::ANALYZE_BUTTON) {
        let _ = writeln!(out, "== Transaction Range ==");
        let _ = writeln!(
            out,
            "button: {}{}",
            button.text,
            if button.disabled { " (disabled)" } else { "" }
        );
    }

    if let Some(section) = doc.element(ids::STATS_SECTION) {
        if !section.is_hidden() {
            if let Some(stats) = doc.element(ids::STATS_CONTENT) {
                let _ = writeln!(out, "{}", stats.text);
            }
        }
    }

    if let Some(section) = doc.element(ids::SAMPLE_DATA_SECTION) {
        if !section.is_hidden() {
            for (title, id) in [("First two", ids::FIRST_TWO_TABLE), ("Last two", ids::LAST_TWO_TABLE)] {
                if let Some(table) = doc.element(id) {
                    let _ = writeln!(out, "{}:", title);
                    out.push_str(&render_table(table));
                }
            }
        }
    }

    if let Some(section) = doc.element(ids::CHARTS_SECTION) {
        if !section.is_hidden() {
            for (title, id) in [("Line chart", ids::LINE_CHART), ("Pie chart", ids::PIE_CHART)] {
                if let Some(chart) = doc.element(id) {
                    let _ = writeln!(out, "{}: {}", title, chart_status(chart));
                }
            }
        }
    }

    out
}

fn render_table(element: &Element) -> String {
    let mut table = Table::new(element.columns.as_slice());
    for row in &element.rows {
        let cells: Vec<&str> = row.cells.iter().map(|c| c.text.as_str()).collect();
        table.add_row(cells.as_slice());
    }
    table.render()
}

fn chart_status(chart: &Element) -> String {
    match (&chart.src, chart.is_hidden()) {
        (Some(src), false) => format!("shown ({} bytes of image data)", src.len()),
        _ => "hidden".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Cell, Display, PageLayout, TableRow};

    #[test]
    fn test_fresh_page() {
        let doc = Document::for_layout(PageLayout::Combined);
        let text = render_text(&doc);
        assert!(text.contains("(no result)"));
        assert!(text.contains("button: Analyze"));
        assert!(!text.contains("First two"));
    }

    #[test]
    fn test_revealed_sections() {
        let mut doc = Document::for_layout(PageLayout::TransactionRange);
        for section in ids::RESULT_SECTIONS {
            doc.element_mut(section).unwrap().remove_class(ids::HIDDEN_CLASS);
        }
        doc.element_mut(ids::STATS_CONTENT).unwrap().text = "Total Transactions: 5".to_string();
        doc.element_mut(ids::FIRST_TWO_TABLE).unwrap().rows.push(TableRow {
            cells: vec![
                Cell::plain("M1"),
                Cell::plain("Ada"),
                Cell::plain("N/A"),
                Cell::plain("3.00"),
                Cell::styled("Safe", ids::SAFE_STATUS_CLASS),
            ],
        });
        let pie = doc.element_mut(ids::PIE_CHART).unwrap();
        pie.src = Some("data:image/png;base64,AAAA".to_string());
        pie.display = Display::Block;
        doc.element_mut(ids::LINE_CHART).unwrap().display = Display::None;

        let text = render_text(&doc);
        assert!(text.contains("Total Transactions: 5"));
        assert!(text.contains("M1          | Ada"));
        assert!(text.contains("Line chart: hidden"));
        assert!(text.contains("Pie chart: shown"));
    }
}
