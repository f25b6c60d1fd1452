use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WpValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<WpValue>),
    Map(BTreeMap<String, WpValue>),
}

impl Default for WpValue {
    fn default() -> Self {
        Self::Null
    }
}

impl WpValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            Self::String(value) => value.clone(),
            Self::Array(values) => {
                let parts = values
                    .iter()
                    .map(WpValue::to_text)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}]", parts)
            }
            Self::Map(values) => {
                let parts = values
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value.to_text()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", parts)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_null() {
        assert!(WpValue::default().is_null());
        assert_eq!(WpValue::default().type_name(), "null");
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(WpValue::Bool(true).as_bool(), Some(true));
        assert_eq!(WpValue::Number(7.0).as_number(), Some(7.0));
        assert_eq!(WpValue::String("x".to_string()).as_string(), Some("x"));
        assert_eq!(WpValue::Bool(true).as_number(), None);
        assert_eq!(WpValue::Null.as_string(), None);
    }

    #[test]
    fn to_text_renders_scalars_and_containers() {
        assert_eq!(WpValue::Null.to_text(), "");
        assert_eq!(WpValue::Number(42.0).to_text(), "42");
        assert_eq!(WpValue::Number(1.5).to_text(), "1.5");
        let list = WpValue::Array(vec![WpValue::Number(1.0), WpValue::String("a".to_string())]);
        assert_eq!(list.to_text(), "[1, a]");
        let mut map = BTreeMap::new();
        map.insert("k".to_string(), WpValue::Bool(false));
        assert_eq!(WpValue::Map(map).to_text(), "{k: false}");
    }

    #[test]
    fn untagged_serde_round_trip() {
        let value = WpValue::Array(vec![
            WpValue::Null,
            WpValue::Bool(true),
            WpValue::Number(2.0),
            WpValue::String("hi".to_string()),
        ]);
        let json = serde_json::to_string(&value).expect("serialize should pass");
        assert_eq!(json, r#"[null,true,2.0,"hi"]"#);
        let back: WpValue = serde_json::from_str(&json).expect("deserialize should pass");
        assert_eq!(back, value);
    }
}
