use serde::{Deserialize, Serialize};

use super::resource::SupportInfo;
use super::{FieldValue, Fields, pagination_field};

/// A user as returned by the read endpoints. All five fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

impl Fields for UserRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "email" => Some(FieldValue::Text(&self.email)),
            "first_name" => Some(FieldValue::Text(&self.first_name)),
            "last_name" => Some(FieldValue::Text(&self.last_name)),
            "avatar" => Some(FieldValue::Text(&self.avatar)),
            _ => None,
        }
    }
}

/// `GET users?page=N`. Records keep the order the API returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    pub data: Vec<UserRecord>,
}

impl Fields for UserList {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        pagination_field(name, self.page, self.per_page, self.total, self.total_pages)
    }
}

/// `GET users/{id}`. A missing user comes back as `{}`, i.e. both fields absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleUserEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<UserRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportInfo>,
}

impl SingleUserEnvelope {
    pub fn is_empty(&self) -> bool {
        self.data.is_none() && self.support.is_none()
    }
}

/// Create/update request body. Unset fields are left off the wire; empty
/// strings are real values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutableUserEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

impl MutableUserEdit {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            job: Some(job.into()),
        }
    }

    pub fn job_only(job: impl Into<String>) -> Self {
        Self {
            name: None,
            job: Some(job.into()),
        }
    }
}

/// What `POST users` / `PUT|PATCH users/{id}` echo back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEditEcho {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    /// reqres returns the generated id as a string.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Fields for UserEditEcho {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => self.name.as_deref().map(FieldValue::Text),
            "job" => self.job.as_deref().map(FieldValue::Text),
            "createdAt" => self.created_at.as_deref().map(FieldValue::Text),
            "updatedAt" => self.updated_at.as_deref().map(FieldValue::Text),
            "id" => match self.id.as_ref()? {
                serde_json::Value::String(id) => Some(FieldValue::Text(id)),
                serde_json::Value::Number(id) => id.as_i64().map(FieldValue::Int),
                _ => None,
            },
            _ => None,
        }
    }
}
