//! 通用编辑表单
//!
//! 以线上 JSON 对象为底，按字段名读写，提交时再反序列化为具体资源类型。

use super::{FieldSpec, InputKind};
use crate::error::{AppResult, FieldError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDraft {
    fields: Map<String, Value>,
}

impl ResourceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_item<T: Serialize + ?Sized>(item: &T) -> Self {
        let fields = match serde_json::to_value(item) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                tracing::warn!(error = %e, "item could not be turned into a form");
                Map::new()
            }
        };
        Self { fields }
    }

    /// 字段的文本形式；数组按行拼接
    pub fn text(&self, name: &str) -> String {
        match self.fields.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
            Some(other) => other.to_string(),
        }
    }

    pub fn set(&mut self, spec: &FieldSpec, value: impl Into<String>) {
        let value = value.into();
        let json = match spec.input {
            InputKind::Lines => Value::Array(
                value
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| Value::String(line.to_string()))
                    .collect(),
            ),
            InputKind::Image if value.is_empty() => Value::Null,
            _ => Value::String(value),
        };
        self.fields.insert(spec.name.to_string(), json);
    }

    /// 未填写的必填字段
    pub fn missing(&self, specs: &[FieldSpec]) -> Vec<FieldError> {
        specs
            .iter()
            .filter(|spec| spec.required && self.text(spec.name).trim().is_empty())
            .map(|spec| FieldError::required(spec.name))
            .collect()
    }

    pub fn to_item<T: DeserializeOwned>(&self) -> AppResult<T> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}
