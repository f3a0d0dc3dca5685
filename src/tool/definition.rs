// ABOUTME: Defines ToolDefinition and ParameterSpec - the structured parameter
// ABOUTME: schema for each tool, its JSON Schema rendering, and argument validation.

use serde_json::{Map, Value, json};

use crate::error::ToolError;

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Integer,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::String => "string",
            ParameterKind::Integer => "integer",
        }
    }
}

/// One parameter of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
    pub allowed: Vec<&'static str>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl ParameterSpec {
    /// A required string parameter.
    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::String,
            description,
            required: true,
            default: None,
            allowed: Vec::new(),
            minimum: None,
            maximum: None,
        }
    }

    /// A required integer parameter.
    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: ParameterKind::Integer,
            ..Self::string(name, description)
        }
    }

    /// Make the parameter optional, filled with `default` when absent.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(default.into());
        self
    }

    /// Restrict a string parameter to a fixed set of values.
    pub fn one_of(mut self, allowed: &[&'static str]) -> Self {
        self.allowed = allowed.to_vec();
        self
    }

    /// Restrict an integer parameter to an inclusive range.
    pub fn range(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.kind.as_str()));
        schema.insert("description".into(), json!(self.description));
        if !self.allowed.is_empty() {
            schema.insert("enum".into(), json!(self.allowed));
        }
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        if let Some(minimum) = self.minimum {
            schema.insert("minimum".into(), json!(minimum));
        }
        if let Some(maximum) = self.maximum {
            schema.insert("maximum".into(), json!(maximum));
        }
        Value::Object(schema)
    }

    /// Check a supplied value, returning its canonical form.
    fn check(&self, value: &Value) -> Result<Value, String> {
        match self.kind {
            ParameterKind::String => {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("'{}' must be a string", self.name))?;
                if !self.allowed.is_empty() && !self.allowed.contains(&s) {
                    return Err(format!(
                        "'{}' must be one of: {}",
                        self.name,
                        self.allowed.join(", ")
                    ));
                }
                Ok(value.clone())
            }
            ParameterKind::Integer => {
                let n = value
                    .as_i64()
                    .or_else(|| {
                        value
                            .as_f64()
                            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                            .map(|f| f as i64)
                    })
                    .ok_or_else(|| format!("'{}' must be an integer", self.name))?;
                let below = self.minimum.is_some_and(|min| n < min);
                let above = self.maximum.is_some_and(|max| n > max);
                if below || above {
                    return Err(format!(
                        "'{}' must be between {} and {}",
                        self.name,
                        self.minimum.unwrap_or(i64::MIN),
                        self.maximum.unwrap_or(i64::MAX)
                    ));
                }
                Ok(json!(n))
            }
        }
    }
}

fn present<'a>(supplied: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    supplied.get(name).filter(|v| !v.is_null())
}

/// A named, schema-described tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolDefinition {
    /// Names of the parameters callers must supply.
    pub fn required(&self) -> Vec<&'static str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect()
    }

    /// Render the parameters as a JSON Schema object.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required(),
        })
    }

    /// Validate raw call arguments against this definition.
    ///
    /// Missing required parameters are reported first and together. The
    /// returned map holds only declared parameters, with defaults applied.
    pub fn validate(&self, arguments: Option<&Value>) -> Result<Map<String, Value>, ToolError> {
        let empty = Map::new();
        let supplied = match arguments {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ToolError::InvalidArguments(
                    "arguments must be an object".to_string(),
                ));
            }
        };

        let missing: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required && present(supplied, p.name).is_none())
            .map(|p| p.name)
            .collect();
        if !missing.is_empty() {
            return Err(ToolError::InvalidArguments(format!(
                "missing required parameter(s): {}",
                missing.join(", ")
            )));
        }

        let mut validated = Map::new();
        let mut problems = Vec::new();
        for param in &self.parameters {
            match present(supplied, param.name) {
                Some(value) => match param.check(value) {
                    Ok(v) => {
                        validated.insert(param.name.to_string(), v);
                    }
                    Err(problem) => problems.push(problem),
                },
                None => {
                    if let Some(default) = &param.default {
                        validated.insert(param.name.to_string(), default.clone());
                    }
                }
            }
        }

        if !problems.is_empty() {
            return Err(ToolError::InvalidArguments(problems.join("; ")));
        }

        Ok(validated)
    }
}
