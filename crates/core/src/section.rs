//! Section titles and extraction of labeled sections from model output

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// A labeled answer section.
///
/// Variant order is the canonical order; the derived `Ord` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionTitle {
    Definition,
    Symptoms,
    Prevention,
    MedicalSuggestions,
}

impl SectionTitle {
    /// All titles in canonical order
    pub const ALL: [SectionTitle; 4] = [
        SectionTitle::Definition,
        SectionTitle::Symptoms,
        SectionTitle::Prevention,
        SectionTitle::MedicalSuggestions,
    ];

    /// Title as it appears inside a `**Title**` marker
    pub fn as_str(self) -> &'static str {
        match self {
            SectionTitle::Definition => "Definition",
            SectionTitle::Symptoms => "Symptoms",
            SectionTitle::Prevention => "Prevention",
            SectionTitle::MedicalSuggestions => "Medical Suggestions",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionTitle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One compiled marker pattern per title, indexed like `SectionTitle::ALL`.
///
/// The body starts right after the marker and is captured lazily up to a
/// newline followed by `**`, or the end of the text (ignoring one trailing
/// newline). Surrounding whitespace is trimmed later, so a marker directly
/// followed by another marker has an empty body.
static SECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SectionTitle::ALL
        .iter()
        .map(|title| {
            let pattern = format!(
                r"(?is)\*\*{}\*\*(.*?)(?:\n\*\*|\n?\z)",
                regex::escape(title.as_str())
            );
            Regex::new(&pattern).expect("section pattern is a valid regex")
        })
        .collect()
});

/// Sections found in a raw answer, keyed by title.
///
/// Every stored body is trimmed and non-empty. Iteration follows canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSections {
    sections: BTreeMap<SectionTitle, String>,
}

impl ExtractedSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a section body. Blank bodies are dropped.
    pub fn insert(&mut self, title: SectionTitle, body: &str) {
        let body = body.trim();
        if !body.is_empty() {
            self.sections.insert(title, body.to_string());
        }
    }

    pub fn get(&self, title: SectionTitle) -> Option<&str> {
        self.sections.get(&title).map(String::as_str)
    }

    pub fn contains(&self, title: SectionTitle) -> bool {
        self.sections.contains_key(&title)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate `(title, body)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (SectionTitle, &str)> {
        self.sections.iter().map(|(title, body)| (*title, body.as_str()))
    }
}

/// Extract the known sections from free-form model output.
///
/// Matching is case-insensitive and the first marker for a title wins.
/// Markers with unknown titles are ignored. Text without markers yields an
/// empty result.
pub fn extract_sections(text: &str) -> ExtractedSections {
    let mut extracted = ExtractedSections::new();

    for title in SectionTitle::ALL {
        let pattern = &SECTION_PATTERNS[title.index()];
        if let Some(body) = pattern.captures(text).and_then(|caps| caps.get(1)) {
            extracted.insert(title, body.as_str());
        }
    }

    extracted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_markers_yields_nothing() {
        assert!(extract_sections("").is_empty());
        assert!(extract_sections("Influenza is a viral infection.").is_empty());
        assert!(extract_sections("*Definition* single stars do not count").is_empty());
    }

    #[test]
    fn extracts_adjacent_sections() {
        let extracted = extract_sections("**Definition** X\n**Symptoms** Y");

        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted.get(SectionTitle::Definition), Some("X"));
        assert_eq!(extracted.get(SectionTitle::Symptoms), Some("Y"));
    }

    #[test]
    fn body_spans_multiple_lines() {
        let text = "**Symptoms**\n- fever\n- cough\n\n**Prevention**\nWash hands.\n";
        let extracted = extract_sections(text);

        assert_eq!(
            extracted.get(SectionTitle::Symptoms),
            Some("- fever\n- cough")
        );
        assert_eq!(extracted.get(SectionTitle::Prevention), Some("Wash hands."));
    }

    #[test]
    fn markers_match_case_insensitively() {
        let extracted = extract_sections("**MEDICAL SUGGESTIONS** Rest and fluids.");

        assert_eq!(
            extracted.get(SectionTitle::MedicalSuggestions),
            Some("Rest and fluids.")
        );
    }

    #[test]
    fn empty_body_is_not_recorded() {
        let extracted = extract_sections("**Definition**   \n\n**Prevention** Vaccination.");

        assert!(!extracted.contains(SectionTitle::Definition));
        assert_eq!(extracted.get(SectionTitle::Prevention), Some("Vaccination."));
    }

    #[test]
    fn first_occurrence_wins() {
        let text = "**Symptoms** Fever.\n**Symptoms** Headache.";
        let extracted = extract_sections(text);

        assert_eq!(extracted.get(SectionTitle::Symptoms), Some("Fever."));
    }

    #[test]
    fn unknown_markers_end_a_body_but_are_not_recorded() {
        let text = "**Definition** A cold.\n**Causes** Rhinoviruses.";
        let extracted = extract_sections(text);

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted.get(SectionTitle::Definition), Some("A cold."));
    }

    #[test]
    fn preamble_before_first_marker_is_ignored() {
        let text = "Here is what I found:\n\n**Definition** Asthma narrows the airways.";
        let extracted = extract_sections(text);

        assert_eq!(
            extracted.get(SectionTitle::Definition),
            Some("Asthma narrows the airways.")
        );
    }

    #[test]
    fn iteration_follows_canonical_order() {
        let text = "**Prevention** P\n**Definition** D\n**Symptoms** S";
        let titles: Vec<_> = extract_sections(text).iter().map(|(t, _)| t).collect();

        assert_eq!(
            titles,
            vec![
                SectionTitle::Definition,
                SectionTitle::Symptoms,
                SectionTitle::Prevention
            ]
        );
    }

    #[test]
    fn title_serializes_as_display_text() {
        let json = serde_json::to_string(&SectionTitle::MedicalSuggestions).unwrap();
        assert_eq!(json, "\"Medical Suggestions\"");
        assert_eq!(SectionTitle::Symptoms.to_string(), "Symptoms");
    }
}
