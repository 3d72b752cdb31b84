//! Rewrites raw multi-agent transcripts into what the end user should see
//!
//! The backend interleaves the primary agent with sub-agents in a single assistant message and
//! announces each speaker with a `<name>…</name>` text part. Sanitizing a message is one pass
//! over its parts:
//! - system error parts are dropped
//! - speaker markers are dropped, and switch text visibility on for the primary agent and off
//!   for everyone else
//! - invocations of the hand-off tool become a quote of their request while the primary agent
//!   is speaking
//! - every other part is kept as is
pub mod classify;
pub mod config;
pub mod gate;
pub mod rewrite;

pub use classify::{classify, Category};
pub use config::SanitizerConfig;
pub use gate::VisibilityGate;
pub use rewrite::rewrite;

use crate::models::fragment::Fragment;
use crate::models::message::Message;

#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    config: SanitizerConfig,
}

/// State carried from one part to the next while sanitizing a single message
struct Fold {
    gate: VisibilityGate,
    output: Vec<Fragment>,
}

impl Fold {
    fn new(capacity: usize) -> Self {
        Self {
            gate: VisibilityGate::default(),
            output: Vec::with_capacity(capacity),
        }
    }
}

impl Sanitizer {
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Produce the display copy of a message. User messages are returned unchanged.
    pub fn sanitize(&self, message: &Message) -> Message {
        if message.role.is_user() || message.parts.is_empty() {
            return message.clone();
        }

        let fold = message
            .parts
            .iter()
            .fold(Fold::new(message.parts.len()), |fold, part| {
                self.step(fold, part)
            });

        tracing::trace!(
            message_id = %message.id,
            received = message.parts.len(),
            kept = fold.output.len(),
            "sanitized message"
        );
        message.with_parts(fold.output)
    }

    fn step(&self, mut fold: Fold, fragment: &Fragment) -> Fold {
        let category = classify(fragment, &self.config);
        if let Some(output) = rewrite(fragment, category, fold.gate, &self.config) {
            fold.output.push(output);
        }
        if let Category::IdentityMarker(identity) = category {
            fold.gate = fold.gate.after_marker(identity, &self.config);
        }
        fold
    }

    /// Sanitize a conversation for display, leaving out messages with nothing left to show
    pub fn sanitize_history(&self, messages: &[Message]) -> Vec<Message> {
        messages
            .iter()
            .map(|message| self.sanitize(message))
            .filter(Message::has_visible_content)
            .collect()
    }
}

/// Sanitize a message with the default configuration
pub fn sanitize(message: &Message) -> Message {
    Sanitizer::default().sanitize(message)
}
