//! JSON request and response bodies of the content generation API.

use serde::{Deserialize, Serialize};

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl LatLng {
    /// Creates a position.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One text fragment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    /// Fragment text. Non-text parts decode as empty.
    #[serde(default)]
    pub text: String,
}

/// A message: a role and its parts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    /// `user` or `model`. Absent on system instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Message parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user message with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// A role-less text content, as used for system instructions.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Concatenated text of all parts.
    pub fn joined_text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Empty marker enabling map grounding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GoogleMaps {}

/// A tool offered to the model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Map grounding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<GoogleMaps>,
}

/// Location hint for grounded retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    /// The user's position.
    pub lat_lng: LatLng,
}

/// Tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Retrieval settings.
    pub retrieval_config: RetrievalConfig,
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns.
    pub contents: Vec<Content>,
    /// System instruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Tools offered to the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    /// Tool configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

impl GenerateContentRequest {
    /// A single-turn text request.
    pub fn text(prompt: impl Into<String>, system_instruction: &str) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            system_instruction: (!system_instruction.is_empty())
                .then(|| Content::text(system_instruction)),
            tools: Vec::new(),
            tool_config: None,
        }
    }

    /// Adds map grounding around `location`.
    pub fn with_map_grounding(mut self, location: LatLng) -> Self {
        self.tools.push(Tool {
            google_maps: Some(GoogleMaps {}),
        });
        self.tool_config = Some(ToolConfig {
            retrieval_config: RetrievalConfig { lat_lng: location },
        });
        self
    }
}

/// A cited web or map source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceRef {
    /// Link target.
    #[serde(default)]
    pub uri: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
}

/// One grounding chunk; usually exactly one of the fields is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    /// Map result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<SourceRef>,
    /// Web result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<SourceRef>,
}

/// Grounding details of a candidate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Cited chunks.
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One generated answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content.
    #[serde(default)]
    pub content: Option<Content>,
    /// Grounding details.
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Body returned by a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated answers.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(Content::joined_text)
            .unwrap_or_default()
    }

    /// Grounding chunks of the first candidate.
    pub fn grounding_chunks(&self) -> &[GroundingChunk] {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.as_slice())
            .unwrap_or_default()
    }
}
