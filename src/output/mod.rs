// Output formatting: console display of rankings and dataset summaries.

pub mod terminal;

/// Shorten a product title for a chart axis label.
///
/// Titles longer than `max_chars` characters keep their first `max_chars`
/// characters and gain a trailing "...". Counting is by `char`, so titles
/// in any script are cut between characters.
pub fn truncate_chars(title: &str, max_chars: usize) -> String {
    match title.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_string(),
    }
}
