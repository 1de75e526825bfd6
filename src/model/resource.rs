use serde::{Deserialize, Serialize};

use super::{FieldValue, Fields, pagination_field};

/// A Pantone color entry from `GET unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorResource {
    pub id: i64,
    pub name: String,
    pub year: i64,
    /// `#RRGGBB`.
    pub color: String,
    /// `NN-NNNN`.
    pub pantone_value: String,
}

impl Fields for ColorResource {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "name" => Some(FieldValue::Text(&self.name)),
            "year" => Some(FieldValue::Int(self.year)),
            "color" => Some(FieldValue::Text(&self.color)),
            "pantone_value" => Some(FieldValue::Text(&self.pantone_value)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportInfo {
    pub url: String,
    pub text: String,
}

impl Fields for SupportInfo {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "url" => Some(FieldValue::Text(&self.url)),
            "text" => Some(FieldValue::Text(&self.text)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    pub data: Vec<ColorResource>,
}

impl Fields for ResourceList {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        pagination_field(name, self.page, self.per_page, self.total, self.total_pages)
    }
}

/// `GET unknown/{id}`; `{}` when the resource does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleResourceEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ColorResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportInfo>,
}

impl SingleResourceEnvelope {
    pub fn is_empty(&self) -> bool {
        self.data.is_none() && self.support.is_none()
    }
}
