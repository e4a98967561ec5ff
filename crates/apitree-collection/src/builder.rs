use crate::Result;
use crate::config::CollectionConfig;
use crate::model::{CollectionDocument, Event, Info, Variable};
use crate::script::TestScript;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

pub const POSTMAN_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Assembles a [`CollectionDocument`] from a resolved config.
///
/// The identifier and timestamp default to a fresh v4 UUID and the current
/// time; tests pin both to get byte-stable output.
pub struct CollectionBuilder<'a> {
    config: &'a CollectionConfig,
    id: Option<Uuid>,
    generated_at: Option<DateTime<Utc>>,
}

impl<'a> CollectionBuilder<'a> {
    pub fn new(config: &'a CollectionConfig) -> Self {
        Self {
            config,
            id: None,
            generated_at: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn build(self) -> CollectionDocument {
        let config = self.config;
        let id = self.id.unwrap_or_else(Uuid::new_v4);
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);

        let info = Info {
            postman_id: id.to_string(),
            name: format!("{} - Build {}", config.collection_name, config.build_number),
            description: format!(
                "Automatically generated Postman collection for API testing. Build: {}, Generated: {}",
                config.build_number,
                iso_timestamp(&generated_at)
            ),
            schema: POSTMAN_SCHEMA.to_string(),
        };

        let document = CollectionDocument {
            info,
            item: config.profile.folders(&config.base_url),
            event: global_events(),
            variable: vec![
                Variable::string("base_url", &config.base_url),
                Variable::string("build_number", &config.build_number),
            ],
            generated_at,
        };

        tracing::debug!(
            profile = %config.profile,
            requests = document.request_count(),
            "built collection document"
        );

        document
    }
}

/// Build with a random identifier and the current time.
pub fn build(config: &CollectionConfig) -> CollectionDocument {
    CollectionBuilder::new(config).build()
}

/// Pretty-printed JSON with 2-space indentation and no trailing newline.
pub fn serialize(document: &CollectionDocument) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(document)?)
}

/// Millisecond-precision UTC timestamp, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn global_events() -> Vec<Event> {
    vec![
        Event::prerequest(vec![
            "console.log('Running request: ' + pm.info.requestName);".to_string(),
        ]),
        TestScript::new().response_is_json().into_event(),
    ]
}
