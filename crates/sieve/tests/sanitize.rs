use anyhow::Result;
use serde_json::json;
use sieve::models::fragment::Fragment;
use sieve::models::message::Message;
use sieve::models::role::Role;
use sieve::{sanitize, Sanitizer};

fn call(request: &str) -> Fragment {
    Fragment::tool_invocation("databricks-tool-call", json!({ "request": request }))
}

#[test]
fn test_user_messages_are_untouched() {
    let message = Message::user()
        .with_text("<name>sub-1</name>")
        .with_part(Fragment::system_error("boom"))
        .with_part(call("lookup"));

    assert_eq!(sanitize(&message), message);
}

#[test]
fn test_empty_message() {
    let message = Message::assistant();
    let sanitized = sanitize(&message);

    assert!(sanitized.parts.is_empty());
    assert!(!sanitized.has_visible_content());
}

#[test]
fn test_sub_agent_text_is_hidden_until_primary_returns() {
    let message = Message::assistant()
        .with_text("intro")
        .with_text("<name>sa-helper</name>")
        .with_text("still primary")
        .with_text("<name>researcher</name>")
        .with_text("hidden 1")
        .with_text("hidden 2")
        .with_text("<name>ma-final</name>")
        .with_text("visible again");

    let texts: Vec<_> = sanitize(&message)
        .parts
        .iter()
        .filter_map(|part| part.as_text().map(String::from))
        .collect();
    assert_eq!(texts, vec!["intro", "still primary", "visible again"]);
}

#[test]
fn test_tool_call_quote_depends_on_speaker() {
    let open = Message::assistant().with_part(call("find docs"));
    assert_eq!(
        sanitize(&open).parts,
        vec![Fragment::text("\n>\"find docs\"\n\n")]
    );

    let closed = Message::assistant()
        .with_text("<name>sub-1</name>")
        .with_part(call("find docs"));
    assert!(sanitize(&closed).parts.is_empty());
}

#[test]
fn test_system_errors_never_survive() {
    let message = Message::assistant()
        .with_part(Fragment::system_error("first"))
        .with_text("<name>sub-1</name>")
        .with_part(Fragment::system_error("second"))
        .with_text("<name>ma-1</name>")
        .with_part(Fragment::system_error("third"));

    assert!(sanitize(&message).parts.is_empty());
}

#[test]
fn test_end_to_end_scenario() {
    let message = Message::assistant()
        .with_text("Hello")
        .with_text("<name>sub-1</name>")
        .with_text("secret reasoning")
        .with_text("<name>ma-final</name>")
        .with_part(call("lookup"))
        .with_text("Here is the answer.");

    assert_eq!(
        sanitize(&message).parts,
        vec![
            Fragment::text("Hello"),
            Fragment::text("\n>\"lookup\"\n\n"),
            Fragment::text("Here is the answer."),
        ]
    );
}

#[test]
fn test_order_is_preserved_with_passthrough_parts() -> Result<()> {
    let message: Message = serde_json::from_value(json!({
        "id": "a-1",
        "role": "assistant",
        "parts": [
            {"type": "step-start"},
            {"type": "text", "text": "one"},
            {"type": "text", "text": "<name>sub-1</name>"},
            {"type": "file", "url": "https://example.com/chart.png", "mediaType": "image/png"},
            {"type": "text", "text": "hidden"},
            {"type": "tool-databricks-tool-call", "toolCallId": "t1", "state": "output-available",
             "input": {"request": "hidden too"}},
            {"type": "text", "text": "<name>sa-1</name>"},
            {"type": "reasoning", "text": "kept"},
            {"type": "text", "text": "two"}
        ]
    }))?;

    let sanitized = serde_json::to_value(sanitize(&message))?;
    assert_eq!(
        sanitized,
        json!({
            "id": "a-1",
            "role": "assistant",
            "parts": [
                {"type": "step-start"},
                {"type": "text", "text": "one"},
                {"type": "file", "url": "https://example.com/chart.png", "mediaType": "image/png"},
                {"type": "reasoning", "text": "kept"},
                {"type": "text", "text": "two"}
            ]
        })
    );
    Ok(())
}

#[test]
fn test_no_visible_content() {
    let message = Message::new(Role::Assistant)
        .with_part(Fragment::system_error("boom"))
        .with_text("<name>sub-1</name>")
        .with_text("only sub-agent text");

    let sanitizer = Sanitizer::default();
    assert!(!sanitizer.sanitize(&message).has_visible_content());
    assert!(sanitizer.sanitize_history(&[message]).is_empty());
}

#[test]
fn test_repeated_sanitization_of_same_input_is_stable() {
    let message = Message::assistant()
        .with_text("a")
        .with_text("<name>x</name>")
        .with_text("b")
        .with_part(call("c"));

    assert_eq!(sanitize(&message), sanitize(&message));
}

#[test]
fn test_tool_parts_are_matched_by_name_only() -> Result<()> {
    let message: Message = serde_json::from_value(json!({
        "id": "a-2",
        "role": "assistant",
        "parts": [
            {"type": "tool-databricks-tool-call", "toolCallId": "c1", "state": null,
             "input": {"request": "lookup"}},
            {"type": "tool-web-search", "toolCallId": 7, "state": {"phase": 2}, "input": {"q": "x"}}
        ]
    }))?;

    let sanitized = serde_json::to_value(sanitize(&message).parts)?;
    assert_eq!(
        sanitized,
        json!([
            {"type": "text", "text": "\n>\"lookup\"\n\n"},
            {"type": "tool-web-search", "toolCallId": 7, "state": {"phase": 2}, "input": {"q": "x"}}
        ])
    );
    Ok(())
}

#[test]
fn test_nested_closing_tag_keeps_gate_closed() {
    let message = Message::assistant()
        .with_text("<name></name>ma-x</name>")
        .with_text("hidden");

    assert!(sanitize(&message).parts.is_empty());
}
