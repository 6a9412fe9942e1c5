//! GraphQL transport: the `ProjectsApi` seam plus the reqwest-backed
//! implementation that talks to the dashboard server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{OrganizationSlug, OrganizationSummary, Project},
    error::ApiError,
    protocol::{
        CreateProjectData, CreateProjectVariables, GetProjectsVariables, GraphqlRequest,
        GraphqlResponse, OrganizationsData, ProjectsData, CREATE_PROJECT, GET_ORGANIZATIONS,
        GET_PROJECTS,
    },
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const GRAPHQL_URL_ENV: &str = "DASHBOARD_GRAPHQL_URL";
pub const DEFAULT_GRAPHQL_URL: &str = "http://127.0.0.1:8000/graphql/";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid GraphQL endpoint {url:?}: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: Url,
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Endpoint from `DASHBOARD_GRAPHQL_URL`, falling back to the local
    /// development server.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(GRAPHQL_URL_ENV).unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.into());
        let endpoint = Url::parse(&raw).map_err(|source| ConfigError::InvalidEndpoint {
            url: raw,
            source,
        })?;
        Ok(Self::new(endpoint))
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server rejected query: {0}")]
    ServerRejected(ApiError),
    #[error("invalid server payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server response carried no data payload")]
    MissingPayload,
    #[error("projects API is not configured")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server rejected mutation: {0}")]
    ServerRejected(ApiError),
    #[error("invalid server payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server response carried no created project")]
    MissingPayload,
    #[error("projects API is not configured")]
    Unavailable,
}

enum GraphqlFailure {
    Network(reqwest::Error),
    Server(ApiError),
    Decode(serde_json::Error),
    MissingPayload,
}

impl From<GraphqlFailure> for FetchError {
    fn from(value: GraphqlFailure) -> Self {
        match value {
            GraphqlFailure::Network(err) => FetchError::Network(err),
            GraphqlFailure::Server(err) => FetchError::ServerRejected(err),
            GraphqlFailure::Decode(err) => FetchError::Decode(err),
            GraphqlFailure::MissingPayload => FetchError::MissingPayload,
        }
    }
}

impl From<GraphqlFailure> for SubmitError {
    fn from(value: GraphqlFailure) -> Self {
        match value {
            GraphqlFailure::Network(err) => SubmitError::Network(err),
            GraphqlFailure::Server(err) => SubmitError::ServerRejected(err),
            GraphqlFailure::Decode(err) => SubmitError::Decode(err),
            GraphqlFailure::MissingPayload => SubmitError::MissingPayload,
        }
    }
}

/// Capability seam for the dashboard's two server operations (plus the
/// organization directory). Implementations must be injectable so tests can
/// run against an in-process fake.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    async fn fetch_projects(&self, slug: &OrganizationSlug) -> Result<Vec<Project>, FetchError>;

    async fn create_project(
        &self,
        variables: CreateProjectVariables,
    ) -> Result<Project, SubmitError>;

    async fn list_organizations(&self) -> Result<Vec<OrganizationSummary>, FetchError>;
}

/// Fallback implementation for wiring a controller before a transport is
/// configured; every operation fails.
pub struct MissingProjectsApi;

#[async_trait]
impl ProjectsApi for MissingProjectsApi {
    async fn fetch_projects(&self, _slug: &OrganizationSlug) -> Result<Vec<Project>, FetchError> {
        Err(FetchError::Unavailable)
    }

    async fn create_project(
        &self,
        _variables: CreateProjectVariables,
    ) -> Result<Project, SubmitError> {
        Err(SubmitError::Unavailable)
    }

    async fn list_organizations(&self) -> Result<Vec<OrganizationSummary>, FetchError> {
        Err(FetchError::Unavailable)
    }
}

pub struct HttpProjectsApi {
    http: Client,
    endpoint: Url,
}

impl HttpProjectsApi {
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    async fn post<V, D>(&self, query: &'static str, variables: V) -> Result<D, GraphqlFailure>
    where
        V: Serialize + Send,
        D: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&GraphqlRequest { query, variables })
            .send()
            .await
            .map_err(GraphqlFailure::Network)?
            .error_for_status()
            .map_err(GraphqlFailure::Network)?;
        let body = response.bytes().await.map_err(GraphqlFailure::Network)?;
        let envelope: GraphqlResponse<D> =
            serde_json::from_slice(&body).map_err(GraphqlFailure::Decode)?;
        match envelope.into_data() {
            Ok(Some(data)) => Ok(data),
            Ok(None) => Err(GraphqlFailure::MissingPayload),
            Err(err) => {
                warn!(code = ?err.code, "graphql operation rejected by server");
                Err(GraphqlFailure::Server(err))
            }
        }
    }
}

#[async_trait]
impl ProjectsApi for HttpProjectsApi {
    async fn fetch_projects(&self, slug: &OrganizationSlug) -> Result<Vec<Project>, FetchError> {
        debug!(organization = %slug, "fetching project list");
        let data: ProjectsData = self
            .post(
                GET_PROJECTS,
                GetProjectsVariables {
                    organization_slug: slug.clone(),
                },
            )
            .await?;
        Ok(data.projects)
    }

    async fn create_project(
        &self,
        variables: CreateProjectVariables,
    ) -> Result<Project, SubmitError> {
        debug!(organization = %variables.organization_slug, name = %variables.name, "creating project");
        let data: CreateProjectData = self.post(CREATE_PROJECT, variables).await?;
        Ok(data.create_project.project)
    }

    async fn list_organizations(&self) -> Result<Vec<OrganizationSummary>, FetchError> {
        let data: OrganizationsData = self
            .post(GET_ORGANIZATIONS, serde_json::Map::new())
            .await?;
        Ok(data.organizations)
    }
}
