//! Pinecone serverless index over the REST API.

use super::{IndexedEntry, QueryMatch, VectorIndex};
use crate::config::VectorIndexSettings;
use crate::error::{Result, RosterError};
use crate::http::{create_http_client, DEFAULT_TIMEOUT_SECS};
use crate::record::RecordMetadata;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

const CONTROL_PLANE: &str = "https://api.pinecone.io";
const API_VERSION: &str = "2024-07";
/// How long to wait for a freshly created index to become ready.
const READY_POLL_ATTEMPTS: u32 = 30;
const READY_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Handle to a Pinecone index data plane.
pub struct PineconeIndex {
    http: reqwest::Client,
    api_key: String,
    host: String,
    dimension: usize,
}

#[derive(Debug, Deserialize)]
struct IndexList {
    #[serde(default)]
    indexes: Vec<IndexDescription>,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    name: String,
    #[serde(default)]
    dimension: Option<usize>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    status: Option<IndexStatus>,
}

#[derive(Debug, Deserialize)]
struct IndexStatus {
    #[serde(default)]
    ready: bool,
}

#[derive(Serialize)]
struct CreateIndexRequest<'a> {
    name: &'a str,
    dimension: usize,
    metric: &'static str,
    spec: IndexSpec<'a>,
}

#[derive(Serialize)]
struct IndexSpec<'a> {
    serverless: ServerlessSpec<'a>,
}

#[derive(Serialize)]
struct ServerlessSpec<'a> {
    cloud: &'a str,
    region: &'a str,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [IndexedEntry],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Deserialize)]
struct RawMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<RecordMetadata>,
}

impl From<RawMatch> for QueryMatch {
    fn from(raw: RawMatch) -> Self {
        Self {
            id: raw.id,
            score: raw.score,
            metadata: raw.metadata.unwrap_or_default(),
        }
    }
}

impl PineconeIndex {
    /// Connect to the configured index, creating it first if it is missing.
    ///
    /// An existing index with a different dimension is a configuration error:
    /// every vector written must match the configured embedding dimension.
    #[instrument(skip(api_key, settings), fields(index = %settings.name))]
    pub async fn connect(
        api_key: &str,
        settings: &VectorIndexSettings,
        dimension: usize,
    ) -> Result<Self> {
        let http = create_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
        let control = ControlPlane { http: &http, api_key };

        let existing = control
            .list()
            .await?
            .indexes
            .into_iter()
            .find(|i| i.name == settings.name);

        let description = match existing {
            Some(description) => {
                if let Some(found) = description.dimension {
                    if found != dimension {
                        return Err(RosterError::Config(format!(
                            "Index '{}' has dimension {}, but embeddings are configured for {}",
                            settings.name, found, dimension
                        )));
                    }
                }
                description
            }
            None => {
                info!(
                    "Creating index '{}' ({} dimensions, cosine, {}/{})",
                    settings.name, dimension, settings.cloud, settings.region
                );
                control.create(settings, dimension).await?;
                control.wait_until_ready(&settings.name).await?
            }
        };

        let host = description.host.ok_or_else(|| {
            RosterError::VectorIndex(format!("Index '{}' has no data-plane host", settings.name))
        })?;

        info!("Connected to index '{}' at {}", settings.name, host);

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            host: normalize_host(&host),
            dimension,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }
}

/// Prefix a bare host name with `https://`.
fn normalize_host(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

struct ControlPlane<'a> {
    http: &'a reqwest::Client,
    api_key: &'a str,
}

impl ControlPlane<'_> {
    async fn list(&self) -> Result<IndexList> {
        let response = self
            .http
            .get(format!("{}/indexes", CONTROL_PLANE))
            .header("Api-Key", self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await?;
        parse(response, "list indexes").await
    }

    async fn describe(&self, name: &str) -> Result<IndexDescription> {
        let response = self
            .http
            .get(format!("{}/indexes/{}", CONTROL_PLANE, name))
            .header("Api-Key", self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await?;
        parse(response, "describe index").await
    }

    async fn create(&self, settings: &VectorIndexSettings, dimension: usize) -> Result<()> {
        let body = CreateIndexRequest {
            name: &settings.name,
            dimension,
            metric: "cosine",
            spec: IndexSpec {
                serverless: ServerlessSpec {
                    cloud: &settings.cloud,
                    region: &settings.region,
                },
            },
        };

        let response = self
            .http
            .post(format!("{}/indexes", CONTROL_PLANE))
            .header("Api-Key", self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        // 409: created concurrently by another process.
        if response.status() == reqwest::StatusCode::CONFLICT {
            return Ok(());
        }
        let _: serde_json::Value = parse(response, "create index").await?;
        Ok(())
    }

    async fn wait_until_ready(&self, name: &str) -> Result<IndexDescription> {
        for attempt in 1..=READY_POLL_ATTEMPTS {
            let description = self.describe(name).await?;
            let ready = description.status.as_ref().is_some_and(|s| s.ready);
            if ready && description.host.is_some() {
                return Ok(description);
            }
            debug!("Index '{}' not ready yet (attempt {})", name, attempt);
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
        Err(RosterError::VectorIndex(format!(
            "Index '{}' did not become ready in time",
            name
        )))
    }
}

async fn parse<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    action: &str,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(RosterError::VectorIndex(format!(
            "Pinecone {} failed ({}): {}",
            action, status, detail
        )));
    }
    response
        .json()
        .await
        .map_err(|e| RosterError::VectorIndex(format!("Invalid Pinecone {} response: {}", action, e)))
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn upsert(&self, entries: &[IndexedEntry]) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let response = self
            .http
            .post(self.url("/vectors/upsert"))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&UpsertRequest { vectors: entries })
            .send()
            .await?;

        let parsed: UpsertResponse = parse(response, "upsert").await?;
        debug!("Upserted {} vectors", parsed.upserted_count);
        Ok(parsed.upserted_count)
    }

    #[instrument(skip(self, vector))]
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            include_values: false,
        };

        let response = self
            .http
            .post(self.url("/query"))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let parsed: QueryResponse = parse(response, "query").await?;
        let mut matches: Vec<QueryMatch> = parsed.matches.into_iter().map(QueryMatch::from).collect();
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(top_k);
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(
            normalize_host("students-index-abc.svc.aped-4627-b74a.pinecone.io"),
            "https://students-index-abc.svc.aped-4627-b74a.pinecone.io"
        );
        assert_eq!(normalize_host("http://localhost:5080/"), "http://localhost:5080");
    }

    #[test]
    fn test_create_request_shape() {
        let settings = VectorIndexSettings::default();
        let body = CreateIndexRequest {
            name: &settings.name,
            dimension: 768,
            metric: "cosine",
            spec: IndexSpec {
                serverless: ServerlessSpec {
                    cloud: &settings.cloud,
                    region: &settings.region,
                },
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["name"], "students-index");
        assert_eq!(json["dimension"], 768);
        assert_eq!(json["metric"], "cosine");
        assert_eq!(json["spec"]["serverless"]["cloud"], "aws");
        assert_eq!(json["spec"]["serverless"]["region"], "us-east-1");
    }

    #[test]
    fn test_query_request_shape() {
        let vector = [0.5f32, 0.25];
        let json = serde_json::to_value(QueryRequest {
            vector: &vector,
            top_k: 5,
            include_metadata: true,
            include_values: false,
        })
        .unwrap();
        assert_eq!(json["topK"], 5);
        assert_eq!(json["includeMetadata"], true);
        assert_eq!(json["includeValues"], false);
    }

    #[test]
    fn test_query_response_parsing() {
        let raw = r#"{
            "matches": [
                {"id": "student_0001", "score": 0.91,
                 "metadata": {"name": "Nguyen Van A", "skill": "Python", "text": "Name: Nguyen Van A."}},
                {"id": "student_0002", "score": 0.42}
            ],
            "namespace": ""
        }"#;
        let parsed: QueryResponse = serde_json::from_str(raw).unwrap();
        let matches: Vec<QueryMatch> = parsed.matches.into_iter().map(QueryMatch::from).collect();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].metadata.name.as_deref(), Some("Nguyen Van A"));
        assert_eq!(matches[1].metadata, RecordMetadata::default());
    }

    #[test]
    fn test_upsert_payload_skips_missing_metadata() {
        let entry = IndexedEntry {
            id: "student_0001".to_string(),
            values: vec![0.1, 0.2],
            metadata: RecordMetadata {
                name: Some("A".to_string()),
                text: "Name: A.".to_string(),
                ..Default::default()
            },
        };
        let entries = [entry];
        let json = serde_json::to_value(UpsertRequest { vectors: &entries }).unwrap();
        let metadata = &json["vectors"][0]["metadata"];
        assert_eq!(metadata["name"], "A");
        assert!(metadata.get("dob").is_none());
    }
}
