// * List strategy: the second most common publication shape, one prize per
// * <li>. Navigation lists are full of links and rarely carry bare numeric
// * tokens, so no scoring is needed here; token scanning filters them out.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extract::{scan_numeric_tokens, RawCandidate, StrategyKind};

static SELECTOR_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li, dd").expect("Invalid list item selector"));

/// Extracts candidates from list items, in document order.
pub fn extract(html: &str) -> Vec<RawCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for item in document.select(&SELECTOR_ITEM) {
        let text: String = item.text().collect();
        for token in scan_numeric_tokens(&text) {
            candidates.push(RawCandidate::new(token, StrategyKind::List));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_list_of_prizes() {
        let html = r#"
            <ol class="resultado">
                <li>1º - 4312 (Galo)</li>
                <li>2º - 0556 (Gato)</li>
                <li>3º - 7890 (Vaca)</li>
            </ol>
        "#;

        let values: Vec<String> = extract(html).into_iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["4312", "0556", "7890"]);
    }

    #[test]
    fn test_definition_list() {
        let html = r#"
            <dl>
                <dt>1º prêmio</dt><dd>2041</dd>
                <dt>2º prêmio</dt><dd>8813</dd>
            </dl>
        "#;

        let values: Vec<String> = extract(html).into_iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["2041", "8813"]);
    }

    #[test]
    fn test_nav_list_without_tokens_is_silent() {
        let html = r#"
            <ul class="menu">
                <li><a href="/">Início</a></li>
                <li><a href="/resultados">Resultados</a></li>
            </ul>
        "#;

        assert!(extract(html).is_empty());
    }
}
