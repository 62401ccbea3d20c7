//! Plain-text table output.

use std::fmt::Write;

/// Lays out `rows` under `headings` in left-aligned, space-padded columns.
pub fn format_table(headings: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headings.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let heading_cells: Vec<String> = headings.iter().map(|h| (*h).to_string()).collect();
    push_line(&mut out, &widths, &heading_cells);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &widths, &rule);
    for row in rows {
        push_line(&mut out, &widths, row);
    }
    out
}

fn push_line(out: &mut String, widths: &[usize], cells: &[String]) {
    let mut line = String::new();
    for (i, (width, cell)) in widths.iter().zip(cells).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Prints a table, or a note when it has no rows.
pub fn print_table(headings: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("(no rows)");
    } else {
        print!("{}", format_table(headings, rows));
    }
}
