//! Attribute schemas for pre-flight validation of raw configuration values.
//!
//! Planned and prior values arrive as untyped JSON. A [`Schema`] describes
//! the attributes one object shape may carry and checks a raw value against
//! them before anything is decoded or sent over the wire.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::diagnostics::Diagnostics;

/// Wire type of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Int64,
}

impl AttributeType {
    fn matches(self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Int64 => value.is_i64(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => write!(f, "string"),
            AttributeType::Int64 => write!(f, "int64"),
        }
    }
}

/// A single attribute declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    attr_type: AttributeType,
    required: bool,
    computed: bool,
}

impl Attribute {
    /// A user-supplied string that must always be present.
    pub fn required_string() -> Self {
        Self {
            attr_type: AttributeType::String,
            required: true,
            computed: false,
        }
    }

    /// A user-supplied 64-bit integer that must always be present.
    pub fn required_int64() -> Self {
        Self {
            attr_type: AttributeType::Int64,
            required: true,
            computed: false,
        }
    }

    /// A server-assigned string: valid when present, never required.
    pub fn computed_string() -> Self {
        Self {
            attr_type: AttributeType::String,
            required: false,
            computed: true,
        }
    }

    pub fn attr_type(&self) -> AttributeType {
        self.attr_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_computed(&self) -> bool {
        self.computed
    }
}

/// An ordered set of attribute declarations for one object shape.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    attributes: IndexMap<String, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an attribute. Redeclaring a name replaces the previous
    /// declaration.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Looks up a declaration by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Iterates declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(name, attr)| (name.as_str(), attr))
    }

    /// Validates a raw value against this schema.
    ///
    /// Every violation becomes its own error entry; an empty report means
    /// the value is safe to decode. `null` is treated the same as an absent
    /// attribute.
    pub fn validate(&self, value: &Value) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        let Some(object) = value.as_object() else {
            diagnostics.add_error(
                "Invalid configuration",
                format!("Expected a JSON object, got {}", json_type_name(value)),
            );
            return diagnostics;
        };

        for (name, attribute) in &self.attributes {
            match object.get(name) {
                None | Some(Value::Null) => {
                    if attribute.required {
                        diagnostics.add_error(
                            "Missing required attribute",
                            format!("Attribute \"{name}\" is required"),
                        );
                    }
                }
                Some(present) => {
                    if !attribute.attr_type.matches(present) {
                        diagnostics.add_error(
                            "Invalid attribute type",
                            format!(
                                "Attribute \"{name}\" must be of type {}, got {}",
                                attribute.attr_type,
                                json_type_name(present)
                            ),
                        );
                    }
                }
            }
        }

        for name in object.keys() {
            if !self.attributes.contains_key(name) {
                diagnostics.add_error(
                    "Unknown attribute",
                    format!("Attribute \"{name}\" is not declared in the schema"),
                );
            }
        }

        diagnostics
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
