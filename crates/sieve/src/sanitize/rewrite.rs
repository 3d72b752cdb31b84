use super::classify::Category;
use super::config::SanitizerConfig;
use super::gate::VisibilityGate;
use crate::models::fragment::{Fragment, ToolInvocation};

/// Map a classified fragment to what should be displayed for it, if anything
pub fn rewrite(
    fragment: &Fragment,
    category: Category<'_>,
    gate: VisibilityGate,
    config: &SanitizerConfig,
) -> Option<Fragment> {
    match category {
        Category::Drop | Category::IdentityMarker(_) => None,
        Category::ToolCall(invocation) => {
            if gate.is_open() {
                quote_request(invocation, config)
            } else {
                None
            }
        }
        Category::PlainText(_) => {
            if gate.is_open() {
                Some(fragment.clone())
            } else {
                None
            }
        }
        Category::Passthrough => Some(fragment.clone()),
    }
}

/// Render the request of a tool invocation as a markdown block quote
///
/// Invocations without a non-empty string request render as nothing.
pub fn quote_request(invocation: &ToolInvocation, config: &SanitizerConfig) -> Option<Fragment> {
    let request = invocation
        .input_str(&config.request_field)
        .filter(|request| !request.is_empty())?;
    Some(Fragment::text(format!("\n>\"{}\"\n\n", request)))
}
