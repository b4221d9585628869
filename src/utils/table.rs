/// A simple text-based table generator for terminal page snapshots
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Add a row to the table
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let row_strings: Vec<String> = row.iter().map(|s| s.as_ref().to_string()).collect();

        for (i, col) in row_strings.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.chars().count());
            }
        }

        self.rows.push(row_strings);
    }

    /// Render the table as aligned text, one line per row
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    /// Render a single row with proper spacing
    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::new();
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                let width = self.col_widths[i];
                line.push_str(&format!("{:<width$}", col, width = width));
                if i < row.len() - 1 {
                    line.push_str(" | ");
                }
            }
        }
        line.trim_end().to_string()
    }

    /// Render a separator line
    fn render_separator(&self) -> String {
        let mut line = String::new();
        for (i, &width) in self.col_widths.iter().enumerate() {
            line.push_str(&"-".repeat(width));
            if i < self.col_widths.len() - 1 {
                line.push_str("-+-");
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(&["Merchant ID", "Amount", "Status"]);
        table.add_row(&["M1", "12.50", "Safe"]);
        table.add_row(&["M22", "0.00", "Fraud"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Merchant ID | Amount | Status");
        assert_eq!(lines[1], "------------+--------+-------");
        assert_eq!(lines[2], "M1          | 12.50  | Safe");
        assert_eq!(lines[3], "M22         | 0.00   | Fraud");
    }

    #[test]
    fn test_widths_count_characters() {
        let mut table = Table::new(&["Name"]);
        table.add_row(&["Zoë"]);
        assert_eq!(table.render().lines().nth(1), Some("----"));
    }
}
