//! Table rendering for dependency and folder summaries.

use super::theme::Theme;

/// A box-drawn table whose cells may already carry styling.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| console::measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row to the table.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();

        // Widths ignore ANSI escapes so styled cells line up
        for (width, cell) in self.column_widths.iter_mut().zip(&row) {
            *width = (*width).max(console::measure_text_width(cell));
        }

        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table, one line per entry.
    pub fn render(&self, theme: &Theme) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(self.render_border(theme, '┌', '┬', '┐'));
        let header: Vec<String> = self
            .headers
            .iter()
            .map(|h| theme.header.apply_to(h).to_string())
            .collect();
        lines.push(self.render_row(theme, &header));
        lines.push(self.render_border(theme, '├', '┼', '┤'));
        for row in &self.rows {
            lines.push(self.render_row(theme, row));
        }
        lines.push(self.render_border(theme, '└', '┴', '┘'));

        lines
    }

    fn render_border(&self, theme: &Theme, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .column_widths
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        let border = format!("{}{}{}", left, segments.join(mid.to_string().as_str()), right);
        theme.border.apply_to(border).to_string()
    }

    fn render_row(&self, theme: &Theme, row: &[String]) -> String {
        let bar = theme.border.apply_to("│").to_string();
        let mut s = bar.clone();

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(console::measure_text_width(cell));
            s.push_str(&format!(" {}{} {}", cell, " ".repeat(pad), bar));
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_empty() {
        let table = Table::new(&["Name", "Path"]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);

        let output = table.render(&Theme::plain()).join("\n");
        assert!(output.contains("Name"));
        assert!(output.contains("Path"));
    }

    #[test]
    fn table_with_rows() {
        let mut table = Table::new(&["Name", "Version"]);
        table.add_row(["WGET_BINARY", "GNU Wget 1.20.3"]);
        table.add_row(vec!["GIT_BINARY".to_string(), String::new()]);

        assert_eq!(table.row_count(), 2);
        let output = table.render(&Theme::plain()).join("\n");
        assert!(output.contains("WGET_BINARY"));
        assert!(output.contains("GNU Wget 1.20.3"));
    }

    #[test]
    fn rows_share_one_width() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(["short", "x"]);
        table.add_row(["much longer cell", "y"]);

        let lines = table.render(&Theme::plain());
        // top, header, separator, 2 rows, bottom
        assert_eq!(lines.len(), 6);
        let widths: Vec<_> = lines
            .iter()
            .map(|l| console::measure_text_width(l))
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn styled_cells_do_not_break_alignment() {
        let theme = Theme::new();
        let mut table = Table::new(&["Status"]);
        table.add_row([theme.format_status(true, false)]);
        table.add_row(["ok"]);

        let lines = table.render(&Theme::plain());
        let widths: Vec<_> = lines
            .iter()
            .map(|l| console::measure_text_width(l))
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn table_handles_missing_cells() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.add_row(["only", "two"]);

        let output = table.render(&Theme::plain()).join("\n");
        assert!(output.contains("only"));
        assert!(output.contains("┼"));
    }
}
