//! Selection and rendering of extracted sections

use crate::section::{ExtractedSections, SectionTitle, extract_sections};

/// Titles to emit, in canonical order.
///
/// With no requested titles every canonical title is eligible. Titles
/// without extracted content are dropped.
pub fn select_sections(
    extracted: &ExtractedSections,
    requested: &[SectionTitle],
) -> Vec<SectionTitle> {
    SectionTitle::ALL
        .into_iter()
        .filter(|title| requested.is_empty() || requested.contains(title))
        .filter(|title| extracted.contains(*title))
        .collect()
}

/// Render the selected sections as `**Title**\n<body>\n` blocks separated by
/// a blank line. Returns an empty string when nothing is selected.
pub fn render_sections(extracted: &ExtractedSections, titles: &[SectionTitle]) -> String {
    let parts: Vec<String> = titles
        .iter()
        .filter_map(|title| {
            extracted
                .get(*title)
                .map(|body| format!("**{}**\n{}\n", title, body.trim()))
        })
        .collect();

    if parts.is_empty() {
        return String::new();
    }

    let mut rendered = parts.join("\n").trim().to_string();
    rendered.push('\n');
    rendered
}

/// Formatted answer together with the titles it contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResponse {
    pub text: String,
    pub sections: Vec<SectionTitle>,
}

/// Extract, select and render in one step
pub fn format_response(raw_answer: &str, requested: &[SectionTitle]) -> FormattedResponse {
    let extracted = extract_sections(raw_answer);
    let sections = select_sections(&extracted, requested);
    let text = render_sections(&extracted, &sections);

    FormattedResponse { text, sections }
}
