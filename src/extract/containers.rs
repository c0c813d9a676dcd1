// * Container strategy: catches pages that render results as styled div
// * blocks instead of tables or lists. Blocks are selected by result-related
// * class/id fragments, then token-scanned.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extract::{scan_numeric_tokens, RawCandidate, StrategyKind};

static SELECTOR_BLOCK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div, section, article, span, p").expect("Invalid block selector")
});

// * Class/id fragments that mark result content on the sites we ingest
const CONTAINER_HINTS: [&str; 8] = [
    "resultado", "result", "premio", "sorteio", "bicho", "milhar", "palpite", "deu",
];

fn is_result_container(class_attr: Option<&str>, id_attr: Option<&str>) -> bool {
    let mut haystack = String::new();
    if let Some(class) = class_attr {
        haystack.push_str(&class.to_lowercase());
        haystack.push(' ');
    }
    if let Some(id) = id_attr {
        haystack.push_str(&id.to_lowercase());
    }
    if haystack.is_empty() {
        return false;
    }
    CONTAINER_HINTS.iter().any(|hint| haystack.contains(hint))
}

/// Extracts candidates from result-flagged containers, in document order.
pub fn extract(html: &str) -> Vec<RawCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for block in document.select(&SELECTOR_BLOCK) {
        let element = block.value();
        if !is_result_container(element.attr("class"), element.attr("id")) {
            continue;
        }
        let text: String = block.text().collect();
        for token in scan_numeric_tokens(&text) {
            candidates.push(RawCandidate::new(token, StrategyKind::Container));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flagged_div_is_scanned() {
        let html = r#"
            <div class="box-resultado">
                <span>1º</span> <strong>4312</strong>
                <span>2º</span> <strong>0556</strong>
            </div>
        "#;

        let values: Vec<String> = extract(html).into_iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["4312", "0556"]);
    }

    #[test]
    fn test_id_attribute_matches() {
        let html = r#"<section id="premios-hoje"><p>Milhar: 2041</p></section>"#;
        let candidates = extract(html);
        assert!(candidates.iter().any(|c| c.value == "2041"));
    }

    #[test]
    fn test_unflagged_blocks_are_ignored() {
        let html = r#"
            <div class="sidebar">
                <p>Ligue 0800 123 4567</p>
            </div>
        "#;

        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_nested_match_deduplicates_upstream() {
        // * Parent and child both match; both emit the token and the pool
        // * dedup upstream keeps one
        let html = r#"
            <div class="resultado"><span class="milhar">4312</span></div>
        "#;

        let values: Vec<String> = extract(html).into_iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["4312", "4312"]);
    }
}
