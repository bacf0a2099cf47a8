//! Assistant features: chat, proposal summaries and visit routes.

use crate::client::{GroundedText, TextGenerator};
use crate::error::AssistantResult;
use crate::location::{locate, LocationProvider};
use crate::prompts::{parse_addresses, route_prompt, summary_prompt, SUMMARY_FALLBACK};
use gsn_core::messages::SUMMARY_FAILED;
use gsn_core::{Notifier, Proposal, Record};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// First message of every conversation.
pub const GREETING: &str = "Hello! I am the GOTEC Sales Navigator (GSN). How can I assist you today? \
                            You can ask me for technical details, to draft an email, or to provide \
                            sales arguments.";

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The salesperson.
    User,
    /// The assistant.
    Ai,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Author.
    pub sender: Sender,
    /// Message text.
    pub text: String,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }
}

/// Clears the busy flag when a chat turn ends, including on cancellation.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The sales assistant.
///
/// Failures of the generative service never escape as errors from the
/// chat and summary features: they become the text the user reads.
pub struct Assistant<G, L> {
    generator: G,
    location: L,
    notifier: Arc<Notifier>,
    geolocation_timeout: Duration,
    transcript: Mutex<Vec<ChatMessage>>,
    busy: AtomicBool,
}

impl<G: TextGenerator, L: LocationProvider> Assistant<G, L> {
    /// Creates an assistant with a fresh conversation.
    pub fn new(generator: G, location: L, notifier: Arc<Notifier>) -> Self {
        Self {
            generator,
            location,
            notifier,
            geolocation_timeout: Duration::from_secs(10),
            transcript: Mutex::new(vec![ChatMessage::new(Sender::Ai, GREETING)]),
            busy: AtomicBool::new(false),
        }
    }

    /// Sets how long to wait for the current position.
    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Gets the text generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Gets the notifier.
    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    /// Returns the conversation so far.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().clone()
    }

    /// Returns true while a chat turn awaits its answer.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Answers a single prompt.
    pub async fn ask(&self, prompt: &str) -> String {
        match self.generator.generate_text(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Assistant request failed");
                e.user_message()
            }
        }
    }

    /// Sends a chat message and returns the reply.
    ///
    /// Blank input, or input sent while a previous turn is pending, is
    /// ignored and returns `None`.
    pub async fn send(&self, input: &str) -> Option<ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Chat turn already pending");
            return None;
        }
        let _guard = BusyGuard(&self.busy);

        self.transcript
            .lock()
            .push(ChatMessage::new(Sender::User, input));
        let reply = ChatMessage::new(Sender::Ai, self.ask(input).await);
        self.transcript.lock().push(reply.clone());
        Some(reply)
    }

    /// Starts a new conversation.
    pub fn clear(&self) {
        let mut transcript = self.transcript.lock();
        transcript.clear();
        transcript.push(ChatMessage::new(Sender::Ai, GREETING));
    }

    /// Summarizes a proposal for internal review.
    ///
    /// On failure returns a fixed apology and shows an error toast.
    pub async fn summarize(&self, proposal: &Proposal) -> String {
        match self.generator.generate_text(&summary_prompt(proposal)).await {
            Ok(summary) => {
                info!(proposal = %proposal.id(), "Proposal summarized");
                summary
            }
            Err(e) => {
                warn!(proposal = %proposal.id(), error = %e, "Failed to summarize proposal");
                self.notifier.error(SUMMARY_FAILED);
                SUMMARY_FALLBACK.to_string()
            }
        }
    }

    /// Plans a visit route through the addresses in `input`, one per line,
    /// starting from the current position.
    pub async fn plan_route(&self, input: &str) -> AssistantResult<GroundedText> {
        let addresses = parse_addresses(input);
        let prompt = route_prompt(&addresses)?;
        let position = locate(&self.location, self.geolocation_timeout).await?;
        debug!(stops = addresses.len(), "Planning visit route");
        let plan = self
            .generator
            .generate_grounded_text(&prompt, position)
            .await?;
        info!(
            stops = addresses.len(),
            sources = plan.sources.len(),
            "Visit route planned"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ScriptedGenerator, Source, SourceKind};
    use crate::error::{AssistantError, GeolocationError};
    use crate::gemini::LatLng;
    use crate::location::{FixedLocation, NoLocation};
    use gsn_core::{ProposalStatus, Severity};
    use gsn_testkit::fixtures;

    fn leiria() -> FixedLocation {
        FixedLocation(LatLng::new(39.7436, -8.8071))
    }

    fn assistant<L: LocationProvider>(location: L) -> Assistant<ScriptedGenerator, L> {
        Assistant::new(ScriptedGenerator::new(), location, Arc::new(Notifier::default()))
    }

    #[tokio::test]
    async fn chat_keeps_the_transcript() {
        let assistant = assistant(leiria());
        assistant.generator().push_text("A HAMOO é uma linha de centros de torneamento.");

        assert!(assistant.send("   ").await.is_none());
        let reply = assistant.send("O que é a HAMOO?").await.unwrap();
        assert_eq!(reply.sender, Sender::Ai);

        let transcript = assistant.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].text, GREETING);
        assert_eq!(transcript[1], ChatMessage::new(Sender::User, "O que é a HAMOO?"));
        assert_eq!(transcript[2], reply);
        assert!(!assistant.is_busy());

        assistant.clear();
        assert_eq!(assistant.transcript().len(), 1);
    }

    #[tokio::test]
    async fn chat_errors_become_replies() {
        let assistant = assistant(leiria());
        assistant.generator().push_error(AssistantError::MissingApiKey);
        assistant.generator().push_error(AssistantError::Timeout);

        let reply = assistant.send("Olá").await.unwrap();
        assert_eq!(reply.text, crate::error::MISSING_KEY_MESSAGE);
        let reply = assistant.send("Olá outra vez").await.unwrap();
        assert_eq!(
            reply.text,
            "An error occurred while contacting the AI assistant: request timed out"
        );
        assert_eq!(assistant.transcript().len(), 5);
    }

    #[tokio::test]
    async fn summary_falls_back_with_a_toast() {
        let assistant = assistant(leiria());
        let proposal = fixtures::proposal("PROP-2024-001", ProposalStatus::Sent, "2024-08-30", 1000.0);

        assistant.generator().push_text("- Cliente fiel");
        assert_eq!(assistant.summarize(&proposal).await, "- Cliente fiel");
        assert!(assistant.notifier().messages().is_empty());

        assert_eq!(assistant.summarize(&proposal).await, SUMMARY_FALLBACK);
        assert_eq!(
            assistant.notifier().messages(),
            [(Severity::Error, SUMMARY_FAILED.to_string())]
        );
        assert!(assistant.generator().prompts()[0].contains("Oportunidade PROP-2024-001"));
    }

    #[tokio::test]
    async fn route_needs_addresses_before_locating() {
        let assistant = assistant(NoLocation(GeolocationError::PermissionDenied));
        let err = assistant.plan_route("\n  \n").await.unwrap_err();
        assert!(matches!(err, AssistantError::NoAddresses));

        let err = assistant.plan_route("Moldes RP, Leiria").await.unwrap_err();
        assert!(matches!(
            err,
            AssistantError::Geolocation(GeolocationError::PermissionDenied)
        ));
        assert!(assistant.generator().prompts().is_empty());
    }

    #[tokio::test]
    async fn route_returns_grounded_plan() {
        let assistant = assistant(leiria());
        assistant.generator().push_grounded(GroundedText {
            text: "## Itinerário".into(),
            sources: vec![Source {
                kind: SourceKind::Maps,
                title: "Moldes RP".into(),
                uri: "https://maps.example/1".into(),
            }],
        });

        let plan = assistant
            .plan_route("Moldes RP, Leiria\nInjetec, Marinha Grande")
            .await
            .unwrap();
        assert_eq!(plan.text, "## Itinerário");
        assert_eq!(plan.navigation_links().count(), 1);
        assert!(assistant.generator().prompts()[0].contains("Injetec, Marinha Grande"));
    }
}
