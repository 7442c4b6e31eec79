//! Plain-text board table for `view`.

/// Width of each column's content area.
pub const COLUMN_WIDTH: usize = 23;

/// Split `text` into lines no wider than `width` characters, breaking on
/// whitespace and hard-splitting words that are longer than a line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() { word.chars().count() } else { current.chars().count() + 1 + word.chars().count() };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn border(columns: usize, width: usize) -> String {
    let mut line = String::from("+");
    for _ in 0..columns {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn push_row(out: &mut Vec<String>, cells: &[String], width: usize) {
    let wrapped: Vec<Vec<String>> = cells.iter().map(|c| wrap(c, width)).collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

    for line in 0..height {
        let mut row = String::from("|");
        for cell in &wrapped {
            let text = cell.get(line).map(String::as_str).unwrap_or("");
            row.push(' ');
            row.push_str(&pad(text, width));
            row.push_str(" |");
        }
        out.push(row);
    }
}

/// Render columns side by side: a header row, then one row per task index.
pub fn render_columns(headers: &[String], columns: &[Vec<String>]) -> String {
    let width = COLUMN_WIDTH;
    let count = headers.len().max(1);
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = vec![border(count, width)];
    push_row(&mut out, headers, width);
    out.push(border(count, width));

    for r in 0..rows {
        let cells: Vec<String> = (0..headers.len())
            .map(|c| columns.get(c).and_then(|col| col.get(r)).cloned().unwrap_or_default())
            .collect();
        push_row(&mut out, &cells, width);
    }
    if rows > 0 {
        out.push(border(count, width));
    }

    out.join("\n")
}
