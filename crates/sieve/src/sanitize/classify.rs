use super::config::SanitizerConfig;
use crate::models::fragment::{Fragment, TextFragment, ToolInvocation};

#[derive(Debug, Clone, Copy, PartialEq)]
/// What a fragment means to the sanitizer
pub enum Category<'a> {
    /// Never shown
    Drop,
    /// Invocation of the designated tool, shown as a quote of its request
    ToolCall(&'a ToolInvocation),
    /// Speaker change; carries the speaker name with the delimiters stripped
    IdentityMarker(&'a str),
    /// Ordinary text, shown while the gate is open
    PlainText(&'a TextFragment),
    /// Anything else, always shown as is
    Passthrough,
}

/// Classify a fragment. First match wins, since a marker is also a text fragment.
pub fn classify<'a>(fragment: &'a Fragment, config: &SanitizerConfig) -> Category<'a> {
    match fragment {
        Fragment::SystemError(_) => Category::Drop,
        Fragment::ToolInvocation(invocation) if invocation.tool_name == config.tool_call_id => {
            Category::ToolCall(invocation)
        }
        Fragment::Text(text) => match identity(&text.text, config) {
            Some(name) => Category::IdentityMarker(name),
            None => Category::PlainText(text),
        },
        Fragment::ToolInvocation(_) | Fragment::Other(_) => Category::Passthrough,
    }
}

fn identity<'a>(text: &'a str, config: &SanitizerConfig) -> Option<&'a str> {
    text.strip_prefix(config.identity_open.as_str())?
        .strip_suffix(config.identity_close.as_str())
}
