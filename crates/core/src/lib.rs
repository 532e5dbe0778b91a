//! healthbot-core: section handling and retrieval math for the health assistant
//!
//! This crate has no I/O. It extracts labeled sections from model answers,
//! detects which sections a user asked for, renders the final reply, and
//! implements Maximal Marginal Relevance selection over embeddings.

pub mod error;
pub mod format;
pub mod mmr;
pub mod request;
pub mod section;

pub use error::CoreError;
pub use format::{FormattedResponse, format_response, render_sections, select_sections};
pub use mmr::{cosine_similarity, maximal_marginal_relevance};
pub use request::detect_requested_sections;
pub use section::{ExtractedSections, SectionTitle, extract_sections};
