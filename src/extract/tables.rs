// * Tabular strategy: most result sites publish prizes as a two-column
// * table (position, milhar). Layout tables are everywhere on these pages,
// * so tables are scored before their rows are trusted.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::extract::{scan_numeric_tokens, RawCandidate, StrategyKind};

// * Precompiled CSS selectors for performance
static SELECTOR_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("Invalid table selector"));
static SELECTOR_THEAD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead").expect("Invalid thead selector"));
static SELECTOR_TBODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody").expect("Invalid tbody selector"));
static SELECTOR_TH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("Invalid th selector"));
static SELECTOR_TR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("Invalid tr selector"));
static SELECTOR_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("Invalid cell selector"));

// * Minimum heuristic score for a table to be treated as result data
const DATA_TABLE_THRESHOLD: i32 = 4;

// * Heuristic score for one table element:
// * +2 thead, +1 tbody, +2 th cells, -3 nested tables, -3 presentation role,
// * +3/+2 for high text/tag density.
fn table_score(table: &ElementRef) -> i32 {
    let mut score: i32 = 0;

    if table.select(&SELECTOR_THEAD).next().is_some() {
        score += 2;
    }
    if table.select(&SELECTOR_TBODY).next().is_some() {
        score += 1;
    }
    if table.select(&SELECTOR_TH).count() > 0 {
        score += 2;
    }

    // * Nested tables mean layout, not data
    if table.select(&SELECTOR_TABLE).nth(1).is_some() {
        score -= 3;
    }

    if let Some(role) = table.value().attr("role") {
        let role = role.to_lowercase();
        if role == "presentation" || role == "none" {
            score -= 3;
        }
    }

    let text: String = table.text().collect();
    let text_len = text.trim().len();
    let tag_count = table.descendants().count().max(1);
    let ratio = text_len as f32 / tag_count as f32;
    if ratio > 20.0 {
        score += 3;
    } else if ratio > 10.0 {
        score += 2;
    }

    score
}

fn is_data_table(table: &ElementRef) -> bool {
    table_score(table) >= DATA_TABLE_THRESHOLD
}

// * One row's worth of tokens. Header and data cells are concatenated so
// * "<th>1º</th><td>4312</td>" rows and header-less layouts both work.
fn row_tokens(row: &ElementRef) -> Vec<String> {
    let joined = row
        .select(&SELECTOR_CELL)
        .map(|cell| {
            let text: String = cell.text().collect();
            text.trim().to_string()
        })
        .collect::<Vec<_>>()
        .join(" ");
    scan_numeric_tokens(&joined)
}

/// Extracts candidates from every data table, in document order.
pub fn extract(html: &str) -> Vec<RawCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for table in document.select(&SELECTOR_TABLE) {
        if !is_data_table(&table) {
            continue;
        }
        for row in table.select(&SELECTOR_TR) {
            for token in row_tokens(&row) {
                candidates.push(RawCandidate::new(token, StrategyKind::Tabular));
            }
        }
    }

    candidates
}
