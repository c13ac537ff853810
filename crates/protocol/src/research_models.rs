//! Research service payloads.
//!
//! Every field except `score` is optional on the wire, so every field
//! except `score` is an `Option` here. Renderers must handle absence.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Request body for both service endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct TopicRequest {
    pub topic: String,
}

/// The best-ranked paper for a topic.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, TS)]
pub struct Paper {
    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A further paper ranked for the topic.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct RelatedPaper {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Related research notes, sent either as a list or as a single block of text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(untagged)]
pub enum Related {
    List(Vec<String>),
    Text(String),
}

impl Related {
    /// The notes as individual lines.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Related::List(items) => items.iter().map(String::as_str).collect(),
            Related::Text(text) => vec![text.as_str()],
        }
    }
}

/// Outcome of a successful research call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, TS)]
pub struct ResearchResult {
    /// Quality metric computed by the research service (0-10 scale).
    pub score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_paper: Option<Paper>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<Related>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_papers: Option<Vec<RelatedPaper>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_feedback: Option<Vec<String>>,
}

/// One titled group of generated ideas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct IdeaSection {
    pub title: String,

    #[serde(default)]
    pub ideas: Vec<String>,
}

/// Response body of the idea-generation endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
pub struct IdeasResponse {
    #[serde(default)]
    pub sections: Vec<IdeaSection>,
}
