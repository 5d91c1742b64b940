use crate::tree::NodeData;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// The text format an input document was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Json,
    Json5,
    Yaml,
    /// Items supplied directly by the caller, no text involved.
    Inline,
}

impl InputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Json5 => "json5",
            InputFormat::Yaml => "yaml",
            InputFormat::Inline => "inline",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DocumentBody {
    Items(Vec<NodeData>),
    Tree(NodeData),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawDocument {
    pub(crate) body: DocumentBody,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) config: Value,
}

/// Decodes document text. Text starting with `{` or `[` is JSON (falling back to JSON5 for
/// comments, trailing commas, and unquoted keys), text opening with a `//` or `/*` comment is
/// JSON5, and anything else is YAML.
pub(crate) fn decode_text(text: &str) -> Result<(Value, InputFormat)> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput {
            format: "text",
            message: "input is empty".to_string(),
        });
    }

    let leading_comment = trimmed.starts_with("//") || trimmed.starts_with("/*");
    if leading_comment || trimmed.starts_with('{') || trimmed.starts_with('[') {
        if !leading_comment {
            if let Ok(v) = serde_json::from_str::<Value>(trimmed) {
                return Ok((v, InputFormat::Json));
            }
        }
        return json5::from_str::<Value>(trimmed)
            .map(|v| (v, InputFormat::Json5))
            .map_err(|e| Error::InvalidInput {
                format: "json5",
                message: e.to_string(),
            });
    }

    serde_yaml::from_str::<Value>(trimmed)
        .map(|v| (v, InputFormat::Yaml))
        .map_err(|e| Error::InvalidInput {
            format: "yaml",
            message: e.to_string(),
        })
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn nodes_from(value: Value, format: InputFormat) -> Result<Vec<NodeData>> {
    serde_json::from_value::<Vec<NodeData>>(value).map_err(|e| Error::InvalidInput {
        format: format.as_str(),
        message: format!("items: {e}"),
    })
}

pub(crate) fn classify(value: Value, format: InputFormat) -> Result<RawDocument> {
    match value {
        Value::Array(_) => Ok(RawDocument {
            body: DocumentBody::Items(nodes_from(value, format)?),
            title: None,
            description: None,
            config: Value::Object(Map::new()),
        }),
        Value::Object(mut obj) => {
            let config = match obj.remove("config") {
                None | Some(Value::Null) => Value::Object(Map::new()),
                Some(cfg @ Value::Object(_)) => cfg,
                Some(other) => {
                    return Err(Error::InvalidInput {
                        format: format.as_str(),
                        message: format!("`config` must be an object, got {}", kind_name(&other)),
                    });
                }
            };
            let title = optional_string(&obj, "title");
            let description = optional_string(&obj, "description");

            if let Some(items) = obj.remove("items") {
                if !items.is_array() {
                    return Err(Error::InvalidInput {
                        format: format.as_str(),
                        message: format!("`items` must be an array, got {}", kind_name(&items)),
                    });
                }
                return Ok(RawDocument {
                    body: DocumentBody::Items(nodes_from(items, format)?),
                    title,
                    description,
                    config,
                });
            }

            if obj.contains_key("label") || obj.contains_key("children") {
                let tree: NodeData =
                    serde_json::from_value(Value::Object(obj)).map_err(|e| Error::InvalidInput {
                        format: format.as_str(),
                        message: format!("tree: {e}"),
                    })?;
                let title = title.or_else(|| tree.title().map(str::to_string));
                return Ok(RawDocument {
                    body: DocumentBody::Tree(tree),
                    title,
                    description,
                    config,
                });
            }

            Err(Error::UnsupportedDocument { found: "object" })
        }
        other => Err(Error::UnsupportedDocument {
            found: kind_name(&other),
        }),
    }
}

/// Item labels for a top-level item array. Nested arrays are spliced in place.
pub(crate) fn item_labels(nodes: &[NodeData]) -> Vec<String> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            NodeData::List(inner) => out.extend(item_labels(inner)),
            other => out.push(other.label().to_string()),
        }
    }
    out
}
