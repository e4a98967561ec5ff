//! Postman collection v2.1 document model.
//!
//! Field declaration order is the serialization order, so the structs below
//! define the exact shape of `api-collection.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDocument {
    pub info: Info,
    pub item: Vec<Folder>,
    pub event: Vec<Event>,
    pub variable: Vec<Variable>,
    /// Build time, kept for the metadata artifact. Not part of the document.
    #[serde(skip)]
    pub generated_at: DateTime<Utc>,
}

impl CollectionDocument {
    /// Sum of the item counts of every top-level folder.
    pub fn request_count(&self) -> usize {
        self.item.iter().map(|folder| folder.item.len()).sum()
    }

    pub fn requests(&self) -> impl Iterator<Item = &RequestItem> {
        self.item.iter().flat_map(|folder| folder.item.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    pub name: String,
    pub description: String,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<RequestItem>,
}

impl Folder {
    pub fn new(name: impl Into<String>, item: Vec<RequestItem>) -> Self {
        Self {
            name: name.into(),
            item,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub event: Vec<Event>,
    pub request: Request,
    /// Saved example responses; always empty for generated collections.
    pub response: Vec<serde_json::Value>,
}

impl RequestItem {
    pub fn new(name: impl Into<String>, request: Request) -> Self {
        Self {
            name: name.into(),
            event: Vec::new(),
            request,
            response: Vec::new(),
        }
    }

    pub fn with_tests(mut self, tests: crate::script::TestScript) -> Self {
        if !tests.is_empty() {
            self.event.push(tests.into_event());
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub header: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    pub url: String,
    pub description: String,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            method,
            header: Vec::new(),
            body: None,
            url: url.into(),
            description: description.into(),
        }
    }

    /// Attach a raw JSON body (2-space pretty-printed) and its content type.
    pub fn with_json_body<T: Serialize>(mut self, payload: &T) -> Self {
        // Payloads are plain structs of strings and integers, which always serialize.
        let raw = serde_json::to_string_pretty(payload).unwrap_or_default();
        self.header.push(Header::new("Content-Type", "application/json"));
        self.body = Some(Body {
            mode: BodyMode::Raw,
            raw,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub mode: BodyMode,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Listen {
    Prerequest,
    Test,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub listen: Listen,
    pub script: Script,
}

impl Event {
    pub fn prerequest(exec: Vec<String>) -> Self {
        Self {
            listen: Listen::Prerequest,
            script: Script::javascript(exec),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "type")]
    pub kind: String,
    pub exec: Vec<String>,
}

impl Script {
    pub fn javascript(exec: Vec<String>) -> Self {
        Self {
            kind: "text/javascript".to_string(),
            exec,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Variable {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: "string".to_string(),
        }
    }
}
