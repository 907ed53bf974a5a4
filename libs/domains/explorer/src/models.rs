use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::schema::SchemaShape;

/// HTTP methods every resolved endpoint is probed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// The fixed method set, in probing order
    pub const ALL: [HttpMethod; 2] = [HttpMethod::Get, HttpMethod::Post];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a probe: the HTTP status code, or `"error"` when no response was usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Code(u16),
    Error,
}

const ERROR_STATUS: &str = "error";

impl Serialize for ProbeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProbeStatus::Code(code) => serializer.serialize_u16(*code),
            ProbeStatus::Error => serializer.serialize_str(ERROR_STATUS),
        }
    }
}

impl<'de> Deserialize<'de> for ProbeStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(ProbeStatus::Code(code)),
            Raw::Text(text) if text == ERROR_STATUS => Ok(ProbeStatus::Error),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "unexpected probe status '{}'",
                text
            ))),
        }
    }
}

/// Outcome of a single (URL, method) probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub status: ProbeStatus,
    pub status_text: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_schema: Option<SchemaShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_preview: Option<Value>,
}

impl ProbeResult {
    /// Successful 2xx response with its inferred schema and truncated preview
    pub fn success(status: u16, status_text: impl Into<String>, body: &Value) -> Self {
        Self {
            status: ProbeStatus::Code(status),
            status_text: status_text.into(),
            success: true,
            data_schema: Some(crate::schema::infer_schema(body)),
            data_preview: Some(crate::truncate::truncate(body)),
        }
    }

    /// Non-2xx response
    pub fn http_failure(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Code(status),
            status_text: status_text.into(),
            success: false,
            data_schema: None,
            data_preview: None,
        }
    }

    /// Network or parse failure; `message` becomes the status text
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Error,
            status_text: message.into(),
            success: false,
            data_schema: None,
            data_preview: None,
        }
    }
}

/// Results recorded for one resolved endpoint path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    #[serde(rename = "GET", default, skip_serializing_if = "Option::is_none")]
    pub get: Option<ProbeResult>,
    #[serde(rename = "POST", default, skip_serializing_if = "Option::is_none")]
    pub post: Option<ProbeResult>,
    #[serde(rename = "withParams", default, skip_serializing_if = "Option::is_none")]
    pub with_params: Option<BTreeMap<String, ProbeResult>>,
}

impl EndpointRecord {
    pub fn result(&self, method: HttpMethod) -> Option<&ProbeResult> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
        }
    }

    pub fn record(&mut self, method: HttpMethod, result: ProbeResult) {
        match method {
            HttpMethod::Get => self.get = Some(result),
            HttpMethod::Post => self.post = Some(result),
        }
    }

    pub fn record_param(&mut self, fragment: impl Into<String>, result: ProbeResult) {
        self.with_params
            .get_or_insert_with(BTreeMap::new)
            .insert(fragment.into(), result);
    }

    /// Methods whose base probe succeeded, in probing order
    pub fn successful_methods(&self) -> Vec<HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .filter(|method| self.result(*method).is_some_and(|r| r.success))
            .collect()
    }

    /// Query fragments whose probe succeeded
    pub fn successful_params(&self) -> Vec<String> {
        self.with_params
            .iter()
            .flatten()
            .filter(|(_, result)| result.success)
            .map(|(fragment, _)| fragment.clone())
            .collect()
    }

    pub fn has_success(&self) -> bool {
        !self.successful_methods().is_empty() || !self.successful_params().is_empty()
    }
}

/// Everything one probe run recorded, keyed by resolved endpoint path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    endpoints: BTreeMap<String, EndpointRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh record for `path`, replacing anything recorded earlier
    pub fn begin(&mut self, path: &str) -> &mut EndpointRecord {
        let record = self.endpoints.entry(path.to_string()).or_default();
        *record = EndpointRecord::default();
        record
    }

    pub fn get(&self, path: &str) -> Option<&EndpointRecord> {
        self.endpoints.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.endpoints.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EndpointRecord)> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
