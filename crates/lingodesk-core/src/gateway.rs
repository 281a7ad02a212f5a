use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};

use crate::client::{api_error, read_json, ApiClient};
use crate::envelope::{normalize_page, normalize_record};
use crate::error::GatewayError;
use crate::kind::ResourceKind;
use crate::page::{ListQuery, Page};
use crate::record::{Draft, Record, ResourceId};

/// CRUD access to one resource collection.
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    fn kind(&self) -> ResourceKind;

    async fn list(&self, query: &ListQuery) -> Result<Page, GatewayError>;

    async fn create(&self, draft: &Draft) -> Result<Record, GatewayError>;

    async fn update(&self, id: ResourceId, patch: &Draft) -> Result<Record, GatewayError>;

    async fn remove(&self, id: ResourceId) -> Result<(), GatewayError>;
}

#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: ApiClient,
    kind: ResourceKind,
}

impl HttpGateway {
    pub fn new(client: ApiClient, kind: ResourceKind) -> Self {
        Self { client, kind }
    }

    fn item_path(&self, id: ResourceId) -> String {
        format!("{}/{id}", self.kind.path())
    }
}

#[async_trait]
impl ResourceGateway for HttpGateway {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn list(&self, query: &ListQuery) -> Result<Page, GatewayError> {
        let builder = self.client.request(Method::GET, self.kind.path()).query(&query.to_query_pairs());
        let response = self.client.send(builder).await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        let body = read_json(response).await?.ok_or_else(|| GatewayError::Format("empty list response".into()))?;
        let page = normalize_page(body, self.kind.schema(), query.page)?;
        debug!(kind = %self.kind, page = page.page_number, total_pages = page.total_pages, items = page.items.len(), "listed");
        Ok(page)
    }

    async fn create(&self, draft: &Draft) -> Result<Record, GatewayError> {
        let builder = self.client.request(Method::POST, self.kind.path()).json(draft);
        let response = self.client.send(builder).await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        let body = read_json(response).await?.ok_or_else(|| GatewayError::Format("empty create response".into()))?;
        normalize_record(body, self.kind.schema())
    }

    async fn update(&self, id: ResourceId, patch: &Draft) -> Result<Record, GatewayError> {
        let builder = self.client.request(Method::PUT, &self.item_path(id)).json(patch);
        let response = self.client.send(builder).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound { id });
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        match read_json(response).await? {
            Some(body) => normalize_record(body, self.kind.schema()),
            None => {
                warn!(kind = %self.kind, %id, "update returned an empty body; using the submitted values");
                Ok(Record::from_draft(id, patch, self.kind.schema()))
            }
        }
    }

    async fn remove(&self, id: ResourceId) -> Result<(), GatewayError> {
        let builder = self.client.request(Method::DELETE, &self.item_path(id));
        let response = self.client.send(builder).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound { id }),
            s if s.is_success() => Ok(()),
            _ => Err(api_error(response).await),
        }
    }
}

