use scraper::{ElementRef, Html, Selector};

use crate::highs::StatTable;

/// Visible tables with some text, in document order. Hidden and blank
/// tables are not counted, so positions line up with the sport profiles'
/// table selectors.
pub fn parse_tables(html: &str) -> Vec<StatTable> {
    let doc = Html::parse_document(html);
    let Ok(table_sel) = Selector::parse("table") else { return Vec::new() };
    doc.select(&table_sel)
        .filter(|t| !hidden(*t))
        .map(parse_table)
        .filter(has_text)
        .collect()
}

fn has_text(t: &StatTable) -> bool {
    t.headers.iter().chain(t.rows.iter().flatten()).any(|c| !c.trim().is_empty())
}

fn display_none(el: ElementRef<'_>) -> bool {
    el.value().attr("style").is_some_and(|style| {
        let compact: String = style.chars().filter(|c| !c.is_whitespace()).collect();
        compact.to_ascii_lowercase().contains("display:none")
    })
}

/// `display:none` on the element or any ancestor.
fn hidden(el: ElementRef<'_>) -> bool {
    display_none(el) || el.ancestors().filter_map(ElementRef::wrap).any(display_none)
}

fn parse_table(table: ElementRef<'_>) -> StatTable {
    let Ok(tr_sel) = Selector::parse("tr") else { return StatTable::default() };

    let mut head_rows: Vec<Vec<String>> = Vec::new();
    let mut body_rows: Vec<(Vec<String>, bool)> = Vec::new();
    for tr in table.select(&tr_sel).filter(|tr| belongs_to(*tr, table) && !display_none(*tr)) {
        let cells = row_cells(tr);
        if cells.is_empty() { continue; }
        if in_thead(tr, table) {
            head_rows.push(cells);
        } else {
            body_rows.push((cells, all_header_cells(tr)));
        }
    }

    // no <thead>: a leading row made only of <th> cells is the header
    let headers = match head_rows.pop() {
        Some(h) => h,
        None => match body_rows.first() {
            Some((_, true)) => body_rows.remove(0).0,
            _ => Vec::new(),
        },
    };

    let width = headers.len();
    let rows = body_rows
        .into_iter()
        .map(|(mut cells, _)| {
            if width > 0 { cells.resize(width, String::new()); }
            cells
        })
        .collect();
    StatTable::new(headers, rows)
}

fn belongs_to(tr: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    tr.ancestors()
        .find(|n| n.value().as_element().is_some_and(|e| e.name() == "table"))
        .is_some_and(|n| n.id() == table.id())
}

fn in_thead(tr: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    tr.ancestors()
        .take_while(|n| n.id() != table.id())
        .any(|n| n.value().as_element().is_some_and(|e| e.name() == "thead"))
}

fn cell_elements(tr: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| matches!(e.value().name(), "td" | "th") && !display_none(*e))
}

fn all_header_cells(tr: ElementRef<'_>) -> bool {
    cell_elements(tr).all(|e| e.value().name() == "th")
}

fn row_cells(tr: ElementRef<'_>) -> Vec<String> {
    let mut out = Vec::new();
    for cell in cell_elements(tr) {
        let text = collapse_whitespace(&cell.text().collect::<String>());
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, 64);
        for _ in 1..span { out.push(text.clone()); }
        out.push(text);
    }
    out
}

fn collapse_whitespace(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                if !buf.is_empty() { buf.push(' '); }
                in_ws = true;
            }
        } else {
            buf.push(ch);
            in_ws = false;
        }
    }
    buf.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thead_headers_and_tbody_rows() {
        let html = r#"
        <html><body>
          <table><tr><td>layout</td></tr></table>
          <table>
            <thead><tr><th>Statistic</th><th>High</th><th>Player</th><th>Opponent</th></tr></thead>
            <tbody>
              <tr><td>Hits</td><td>4</td><td>Jane   Doe</td><td>Ferris State
                  (3/15/2024)</td></tr>
              <tr><th scope="row">Walks</th><td>3</td><td>A; B</td><td>X (3/1/2024); Y (3/2/2024)</td></tr>
            </tbody>
          </table>
        </body></html>
        "#;
        let tables = parse_tables(html);
        assert_eq!(tables.len(), 2);
        let t = &tables[1];
        assert_eq!(t.headers, vec!["Statistic", "High", "Player", "Opponent"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[0], vec!["Hits", "4", "Jane Doe", "Ferris State (3/15/2024)"]);
        assert_eq!(t.rows[1][2], "A; B");
    }

    #[test]
    fn leading_th_row_is_header_without_thead() {
        let html = r#"<table>
            <tr><th>Statistic</th><th>High</th></tr>
            <tr><td>Goals</td><td>3</td></tr>
            <tr><td>Assists</td></tr>
        </table>"#;
        let t = &parse_tables(html)[0];
        assert_eq!(t.headers, vec!["Statistic", "High"]);
        assert_eq!(t.rows, vec![vec!["Goals".to_string(), "3".into()], vec!["Assists".into(), "".into()]]);
        assert_eq!(t.column("high"), Some(1));
    }

    #[test]
    fn nested_tables_do_not_leak_rows() {
        let html = r#"<table>
            <thead><tr><th>Outer</th></tr></thead>
            <tbody><tr><td><table><tr><td>inner</td></tr></table></td></tr></tbody>
        </table>"#;
        let tables = parse_tables(html);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows.len(), 1);
        assert_eq!(tables[1].rows, vec![vec!["inner".to_string()]]);
    }

    #[test]
    fn colspan_repeats_cell_text() {
        let html = r#"<table><thead><tr><th>A</th><th>B</th><th>C</th></tr></thead>
            <tbody><tr><td colspan="2">wide</td><td>c</td></tr></tbody></table>"#;
        assert_eq!(parse_tables(html)[0].rows[0], vec!["wide", "wide", "c"]);
    }

    #[test]
    fn blank_and_hidden_tables_are_not_counted() {
        let html = r#"
          <table></table>
          <table><tr><td> </td></tr></table>
          <div style="display: none"><table><tr><td>mobile copy</td></tr></table></div>
          <table style="DISPLAY:NONE"><tr><td>hidden</td></tr></table>
          <table><tr><th>Statistic</th></tr><tr><td>Hits</td></tr></table>
        "#;
        let tables = parse_tables(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers, vec!["Statistic"]);
        assert_eq!(tables[0].rows, vec![vec!["Hits".to_string()]]);
    }

    #[test]
    fn hidden_rows_and_cells_are_dropped() {
        let html = r#"<table>
            <tr><th>Statistic</th><th style="display:none">Rank</th><th>High</th></tr>
            <tr style="display:none"><td>Ghost</td><td>1</td><td>9</td></tr>
            <tr><td>Walks</td><td style="display:none">2</td><td>3</td></tr>
        </table>"#;
        let t = &parse_tables(html)[0];
        assert_eq!(t.headers, vec!["Statistic", "High"]);
        assert_eq!(t.rows, vec![vec!["Walks".to_string(), "3".into()]]);
    }

    #[test]
    fn no_tables() {
        assert!(parse_tables("<html><body><p>Nothing</p></body></html>").is_empty());
    }
}
