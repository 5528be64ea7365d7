//! Substring filtering over option labels.

use crate::extract::LabelExtractor;

/// Filter options by case-insensitive substring match against their labels.
///
/// Returns the indices of matching options in their original order. An
/// empty or whitespace-only query matches every option. Pure and
/// deterministic: must be re-invoked whenever the options, the query, or
/// the label extractor change.
///
/// # Example
///
/// ```ignore
/// let options = vec!["Alpha", "Beta"];
/// let hits = filter_options(&options, "bet", &|s: &&str| s.to_string());
/// assert_eq!(hits, vec![1]);
/// ```
pub fn filter_options<T>(
    options: &[T],
    query: &str,
    label_of: &dyn LabelExtractor<T>,
) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    options
        .iter()
        .enumerate()
        .filter(|(_, option)| label_of.label_of(option).to_lowercase().contains(&query))
        .map(|(index, _)| index)
        .collect()
}
