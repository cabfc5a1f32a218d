// Common test infrastructure: a stateful schema registry behind wiremock.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Debug, Clone)]
pub struct StoredVersion {
    pub version: u32,
    pub id: i64,
    pub schema: String,
    pub schema_type: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    subjects: BTreeMap<String, Vec<StoredVersion>>,
    last_id: i64,
    /// `(subject, schema)` writes landing just before that subject's next list.
    pending: Vec<(String, String)>,
}

/// Registry that assigns ids and versions the way a real one does.
///
/// Cloning shares state, so a test can inspect what the mounted copy stored.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry {
    state: Arc<Mutex<State>>,
}

impl FakeRegistry {
    /// Start a mock server with a fresh fake mounted on `/subjects/...`.
    pub async fn start() -> (MockServer, Self) {
        let server = MockServer::start().await;
        let fake = Self::default();
        Mock::given(path_regex("^/subjects/"))
            .respond_with(fake.clone())
            .mount(&server)
            .await;
        (server, fake)
    }

    /// Version numbers currently stored for `subject`.
    pub fn versions(&self, subject: &str) -> Vec<u32> {
        let Ok(state) = self.state.lock() else {
            return Vec::new();
        };
        state
            .subjects
            .get(subject)
            .map(|v| v.iter().map(|s| s.version).collect())
            .unwrap_or_default()
    }

    /// Have another writer register `schema` right before the next version
    /// list of `subject` is served.
    pub fn write_before_next_list(&self, subject: &str, schema: &str) -> Option<()> {
        let mut state = self.state.lock().ok()?;
        state.pending.push((subject.to_string(), schema.to_string()));
        Some(())
    }
}

impl State {
    fn register(&mut self, subject: &str, schema: &str, schema_type: Option<String>) -> i64 {
        self.last_id = self.last_id.saturating_add(1);
        let id = self.last_id;
        let versions = self.subjects.entry(subject.to_string()).or_default();
        let version = versions.last().map_or(1, |v| v.version.saturating_add(1));
        versions.push(StoredVersion {
            version,
            id,
            schema: schema.to_string(),
            schema_type,
        });
        id
    }

    fn flush_pending(&mut self, subject: &str) {
        let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(s, _)| s == subject);
        self.pending = rest;
        for (_, schema) in due {
            self.register(subject, &schema, None);
        }
    }

    fn subject_not_found(subject: &str) -> ResponseTemplate {
        ResponseTemplate::new(404).set_body_json(json!({
            "error_code": 40401,
            "message": format!("Subject '{subject}' not found.")
        }))
    }

    fn get(&self, subject: &str, selector: &str) -> ResponseTemplate {
        let Some(versions) = self.subjects.get(subject) else {
            return Self::subject_not_found(subject);
        };
        let found = if selector == "latest" {
            versions.last()
        } else {
            selector
                .parse::<u32>()
                .ok()
                .and_then(|n| versions.iter().find(|v| v.version == n))
        };
        let Some(found) = found else {
            return ResponseTemplate::new(404).set_body_json(json!({
                "error_code": 40402,
                "message": "Version not found."
            }));
        };

        let mut body = json!({
            "subject": subject,
            "version": found.version,
            "id": found.id,
            "schema": found.schema,
        });
        if let (Some(t), Some(map)) = (&found.schema_type, body.as_object_mut()) {
            map.insert("schemaType".to_string(), Value::String(t.clone()));
        }
        ResponseTemplate::new(200).set_body_json(body)
    }
}

impl Respond for FakeRegistry {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(mut state) = self.state.lock() else {
            return ResponseTemplate::new(500).set_body_string("fake registry poisoned");
        };
        let segments: Vec<&str> = request
            .url
            .path_segments()
            .map(Iterator::collect)
            .unwrap_or_default();

        match (request.method.as_str(), segments.as_slice()) {
            ("POST", ["subjects", subject, "versions"]) => {
                let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
                    return ResponseTemplate::new(422).set_body_string("unreadable body");
                };
                let Some(schema) = body.get("schema").and_then(Value::as_str) else {
                    return ResponseTemplate::new(422).set_body_string("missing schema");
                };
                let schema_type = body
                    .get("schemaType")
                    .and_then(Value::as_str)
                    .filter(|t| *t != "AVRO")
                    .map(str::to_string);
                let id = state.register(subject, schema, schema_type);
                ResponseTemplate::new(200).set_body_json(json!({ "id": id }))
            }
            ("GET", ["subjects", subject, "versions"]) => {
                state.flush_pending(subject);
                match state.subjects.get(*subject) {
                    Some(versions) => version_list(versions),
                    None => State::subject_not_found(subject),
                }
            }
            ("GET", ["subjects", subject, "versions", selector]) => state.get(subject, selector),
            ("DELETE", ["subjects", subject]) => match state.subjects.remove(*subject) {
                Some(versions) => version_list(&versions),
                None => State::subject_not_found(subject),
            },
            _ => ResponseTemplate::new(405).set_body_string("unsupported"),
        }
    }
}

fn version_list(versions: &[StoredVersion]) -> ResponseTemplate {
    let numbers: Vec<u32> = versions.iter().map(|v| v.version).collect();
    ResponseTemplate::new(200).set_body_json(numbers)
}
