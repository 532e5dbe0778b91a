//! Detection of the sections a user asked for

use crate::section::SectionTitle;

/// Keyword table, scanned in order. Several keywords may map to one title.
const SECTION_KEYWORDS: [(&str, SectionTitle); 5] = [
    ("definition", SectionTitle::Definition),
    ("symptom", SectionTitle::Symptoms),
    ("prevention", SectionTitle::Prevention),
    ("medical suggestion", SectionTitle::MedicalSuggestions),
    ("suggestion", SectionTitle::MedicalSuggestions),
];

/// Return the sections explicitly requested in a user message.
///
/// The message is lower-cased and searched for each keyword as a plain
/// substring (no word boundaries). Titles come back in keyword-table order,
/// each at most once. An empty result means no explicit preference.
pub fn detect_requested_sections(message: &str) -> Vec<SectionTitle> {
    let lowered = message.to_lowercase();
    let mut requested = Vec::new();

    for (keyword, title) in SECTION_KEYWORDS {
        if lowered.contains(keyword) && !requested.contains(&title) {
            requested.push(title);
        }
    }

    requested
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_symptoms_and_medical_suggestions() {
        let requested = detect_requested_sections("What are the symptoms and medical suggestions?");

        assert_eq!(
            requested,
            vec![SectionTitle::Symptoms, SectionTitle::MedicalSuggestions]
        );
    }

    #[test]
    fn plain_question_has_no_preference() {
        assert!(detect_requested_sections("Tell me about diabetes").is_empty());
        assert!(detect_requested_sections("").is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        let requested = detect_requested_sections("DEFINITION of Prevention");

        assert_eq!(
            requested,
            vec![SectionTitle::Definition, SectionTitle::Prevention]
        );
    }

    #[test]
    fn result_follows_table_order_not_message_order() {
        let requested = detect_requested_sections("prevention first, then the definition");

        assert_eq!(
            requested,
            vec![SectionTitle::Definition, SectionTitle::Prevention]
        );
    }

    #[test]
    fn substring_matches_count() {
        // "suggestions" alone still selects medical suggestions
        assert_eq!(
            detect_requested_sections("any suggestions?"),
            vec![SectionTitle::MedicalSuggestions]
        );
        assert_eq!(
            detect_requested_sections("asymptomatic flu"),
            vec![SectionTitle::Symptoms]
        );
    }
}
