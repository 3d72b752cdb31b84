use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const TEXT_TYPE: &str = "text";
pub const ERROR_TYPE: &str = "data-error";
pub const TOOL_TYPE_PREFIX: &str = "tool-";

#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    /// Fields we don't interpret, such as streaming state or provider metadata
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    /// The tool name carried in the `tool-<name>` type tag
    pub tool_name: String,
    pub tool_call_id: Option<String>,
    pub state: Option<String>,
    pub input: Option<Value>,
    pub extra: Map<String, Value>,
}

impl ToolInvocation {
    /// Get a string argument from the invocation input, if the input is an object holding one
    pub fn input_str(&self, field: &str) -> Option<&str> {
        self.input.as_ref()?.get(field)?.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
/// One typed part of a message
///
/// Decoding never fails: parts we recognise become their own variant and everything else,
/// including a `text` part whose text is not a string, is kept as `Other`.
pub enum Fragment {
    Text(TextFragment),
    ToolInvocation(ToolInvocation),
    SystemError(Value),
    Other(Value),
}

impl Fragment {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Fragment::Text(TextFragment {
            text: text.into(),
            extra: Map::new(),
        })
    }

    pub fn tool_invocation<S: Into<String>>(tool_name: S, input: Value) -> Self {
        Fragment::ToolInvocation(ToolInvocation {
            tool_name: tool_name.into(),
            tool_call_id: None,
            state: None,
            input: Some(input),
            extra: Map::new(),
        })
    }

    pub fn system_error<S: Into<String>>(error: S) -> Self {
        Fragment::SystemError(json!({ "type": ERROR_TYPE, "data": error.into() }))
    }

    /// Get the text content if this is a Text variant
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fragment::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    pub fn as_tool_invocation(&self) -> Option<&ToolInvocation> {
        if let Fragment::ToolInvocation(ref invocation) = self {
            Some(invocation)
        } else {
            None
        }
    }
}

fn is_optional_string(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).map_or(true, Value::is_string)
}

/// Take `key` out of `map` if it holds a string; any other value stays in place
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !map.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

impl From<Value> for Fragment {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Fragment::Other(value);
        };
        let kind = match map.get("type").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => return Fragment::Other(Value::Object(map)),
        };

        if kind == TEXT_TYPE {
            if !is_optional_string(&map, "text") {
                return Fragment::Other(Value::Object(map));
            }
            map.remove("type");
            let text = take_string(&mut map, "text").unwrap_or_default();
            return Fragment::Text(TextFragment { text, extra: map });
        }

        if kind == ERROR_TYPE {
            return Fragment::SystemError(Value::Object(map));
        }

        if let Some(tool_name) = kind.strip_prefix(TOOL_TYPE_PREFIX) {
            let tool_name = tool_name.to_string();
            map.remove("type");
            return Fragment::ToolInvocation(ToolInvocation {
                tool_name,
                tool_call_id: take_string(&mut map, "toolCallId"),
                state: take_string(&mut map, "state"),
                input: map.remove("input"),
                extra: map,
            });
        }

        Fragment::Other(Value::Object(map))
    }
}

impl From<Fragment> for Value {
    fn from(fragment: Fragment) -> Self {
        match fragment {
            Fragment::Text(TextFragment { text, mut extra }) => {
                extra.insert("type".to_string(), Value::from(TEXT_TYPE));
                extra.insert("text".to_string(), Value::String(text));
                Value::Object(extra)
            }
            Fragment::ToolInvocation(invocation) => {
                let mut map = invocation.extra;
                map.insert(
                    "type".to_string(),
                    Value::String(format!("{}{}", TOOL_TYPE_PREFIX, invocation.tool_name)),
                );
                if let Some(id) = invocation.tool_call_id {
                    map.insert("toolCallId".to_string(), Value::String(id));
                }
                if let Some(state) = invocation.state {
                    map.insert("state".to_string(), Value::String(state));
                }
                if let Some(input) = invocation.input {
                    map.insert("input".to_string(), input);
                }
                Value::Object(map)
            }
            Fragment::SystemError(value) | Fragment::Other(value) => value,
        }
    }
}
