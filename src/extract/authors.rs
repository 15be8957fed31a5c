use scraper::{ElementRef, Selector};

/// Extracts the author names of a result row, in document order
///
/// Each matching element's text is trimmed; elements that are empty after
/// trimming are skipped. A row without authors yields an empty vector.
pub fn extract_authors(row: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    row.select(selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
