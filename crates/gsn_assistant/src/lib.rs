//! # GSN Assistant
//!
//! Generative text assistant for the GOTEC Sales Navigator.
//!
//! This crate provides:
//! - A `TextGenerator` abstraction with a Gemini client and a scripted one
//! - Chat with a product knowledge base as system instruction
//! - Internal proposal summaries
//! - Visit route planning grounded on map data around the current position
//!
//! The HTTP transport and the position source are traits, so the same
//! assistant runs against `ureq`, a scripted client or anything else.
//!
//! Errors of the generative service are converted into the text shown to
//! the user; the record stores are never touched here.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod assistant;
mod client;
mod config;
mod error;
pub mod gemini;
mod http;
mod location;
pub mod prompts;

pub use assistant::{Assistant, ChatMessage, Sender, GREETING};
pub use client::{GeminiClient, GroundedText, ScriptedGenerator, Source, SourceKind, TextGenerator};
pub use config::{AssistantConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error::{AssistantError, AssistantResult, GeolocationError, MISSING_KEY_MESSAGE};
pub use gemini::LatLng;
pub use http::{HttpClient, HttpResponse, RecordedRequest, ScriptedHttpClient, UreqClient};
pub use location::{locate, FixedLocation, LocationProvider, NoLocation};
