//! The administrative client and its operation set

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::config::{ClientConfig, PayloadFormat};
use crate::error::{ClientError, Result};
use crate::model::{CreateRepository, GroupId, GroupRepository, RepositoryGroup, RepositoryId};

/// Status reported by a group mutation that needed no network write: the
/// repository was already a member on add, or already absent on remove.
pub const NOOP_STATUS: u16 = 0;

/// The administrative operation set
///
/// One concrete implementation exists ([`NexusClient`]); the trait is the
/// seam for callers that want to substitute the whole client. Integer
/// return values are the underlying HTTP response codes.
#[async_trait]
pub trait RepositoryManager: Send + Sync {
    /// Check whether the repository exists.
    async fn repository_exists(&self, id: &RepositoryId) -> Result<bool>;

    /// Create a hosted Maven2 SNAPSHOT repository named after its id.
    async fn create_snapshot_repository(&self, id: &RepositoryId) -> Result<u16>;

    /// Delete the repository. Deleting a nonexistent repository succeeds.
    async fn delete_repository(&self, id: &RepositoryId) -> Result<u16>;

    /// Add the repository to the group, if it is not already a member.
    async fn add_repository_to_group(&self, id: &RepositoryId, group_id: &GroupId) -> Result<u16>;

    /// Remove the repository from the group, if it is a member.
    async fn remove_repository_from_group(
        &self,
        id: &RepositoryId,
        group_id: &GroupId,
    ) -> Result<u16>;
}

/// Client for the repository manager's administrative REST API
///
/// Holds only immutable configuration and a thread-safe HTTP client, so a
/// single instance may be shared across tasks. Each operation is one
/// independent request/response exchange (group mutations are two); there
/// is no caching between them and no retry on failure.
pub struct NexusClient {
    config: ClientConfig,
    http: reqwest::Client,
    auth_header: String,
}

impl NexusClient {
    /// Create a client with a default transport (30s timeout).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::NetworkError {
                message: e.to_string(),
            })?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client over a caller-supplied transport. Useful for tests
    /// and for callers that manage their own connection pool.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        let auth_header = config.basic_auth();
        Self {
            config,
            http,
            auth_header,
        }
    }

    /// The normalized base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn repository_url(&self, id: &RepositoryId) -> String {
        format!("{}/service/local/repositories/{}", self.config.base_url, id)
    }

    fn group_url(&self, group_id: &GroupId) -> String {
        format!("{}/service/local/repo_groups/{}", self.config.base_url, group_id)
    }

    /// Fetch a repository group whole.
    ///
    /// The two group mutations are read-modify-write over this call, so its
    /// contract matters: anything but 200 is an error, and the body must
    /// decode as the `{"data": {...}}` envelope.
    pub async fn fetch_repository_group(&self, group_id: &GroupId) -> Result<RepositoryGroup> {
        let response = self
            .http
            .get(self.group_url(group_id))
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if status != 200 {
            return Err(ClientError::UnexpectedStatus { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Write a whole group back. 200 is the only success.
    async fn put_repository_group(
        &self,
        group_id: &GroupId,
        group: &RepositoryGroup,
    ) -> Result<u16> {
        let body = serde_json::to_string(group)?;

        let response = self
            .http
            .put(self.group_url(group_id))
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus { status, body });
        }

        Ok(status)
    }
}

#[async_trait]
impl RepositoryManager for NexusClient {
    async fn repository_exists(&self, id: &RepositoryId) -> Result<bool> {
        let response = self
            .http
            .get(self.repository_url(id))
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        // Body is read and discarded; only the status carries meaning here.
        response.bytes().await?;

        match status {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(ClientError::UnexpectedStatus {
                status,
                body: String::new(),
            }),
        }
    }

    async fn create_snapshot_repository(&self, id: &RepositoryId) -> Result<u16> {
        let descriptor = CreateRepository::snapshot(id, &self.config.base_url);
        let body = match self.config.format {
            PayloadFormat::Xml => descriptor.to_xml()?,
            PayloadFormat::Json => descriptor.to_json()?,
        };

        let response = self
            .http
            .post(format!(
                "{}/service/local/repositories",
                self.config.base_url
            ))
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, self.config.format.content_type())
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 201 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus { status, body });
        }

        Ok(status)
    }

    async fn delete_repository(&self, id: &RepositoryId) -> Result<u16> {
        let response = self
            .http
            .delete(self.repository_url(id))
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        response.bytes().await?;

        // 404 counts as success: deleting what is already gone is a no-op.
        match status {
            204 | 404 => Ok(status),
            _ => Err(ClientError::UnexpectedStatus {
                status,
                body: String::new(),
            }),
        }
    }

    async fn add_repository_to_group(&self, id: &RepositoryId, group_id: &GroupId) -> Result<u16> {
        let mut group = self.fetch_repository_group(group_id).await?;

        if group.contains(id) {
            tracing::debug!(
                "repository {} already in group {}, skipping write",
                id,
                group_id
            );
            return Ok(NOOP_STATUS);
        }

        group.data.repositories.push(GroupRepository {
            name: id.to_string(),
            id: id.clone(),
            resource_uri: format!("{}/{}", self.group_url(group_id), id),
        });

        self.put_repository_group(group_id, &group).await
    }

    async fn remove_repository_from_group(
        &self,
        id: &RepositoryId,
        group_id: &GroupId,
    ) -> Result<u16> {
        let mut group = self.fetch_repository_group(group_id).await?;

        if !group.contains(id) {
            tracing::debug!(
                "repository {} not in group {}, skipping write",
                id,
                group_id
            );
            return Ok(NOOP_STATUS);
        }

        group.remove_member(id);

        self.put_repository_group(group_id, &group).await
    }
}
