use crate::extractor::model::PageResult;

const SUMMARY_SENTENCES: usize = 3;
const MAX_SUMMARY_CHARS: usize = 500;

/// Short human-readable digest of a page: its first few sentences, headed by
/// the title in bold when there is one.
pub fn summarize(result: &PageResult) -> String {
    if let Some(error) = &result.error {
        return format!("Unable to access {}: {}", result.url, error);
    }
    if result.content.is_empty() {
        return format!("No content found at {}", result.url);
    }

    let mut summary = result
        .content
        .split(". ")
        .take(SUMMARY_SENTENCES)
        .collect::<Vec<_>>()
        .join(". ");

    if summary.chars().count() > MAX_SUMMARY_CHARS {
        summary = summary.chars().take(MAX_SUMMARY_CHARS).collect();
        summary.push_str("...");
    }

    match &result.title {
        Some(title) => format!("**{title}**\n\n{summary}"),
        None => summary,
    }
}
