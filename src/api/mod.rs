//! REST client for the products and users endpoints.
//!
//! One generic [`ResourceClient`] serves every resource; the [`Entity`] trait
//! tells it the collection path and the draft type to send.
//!
pub mod models;

use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::error::{ApiError, Result};

pub use models::{EntityId, Product, ProductDraft, User, UserDraft};

/// A backend-owned resource reachable at `/{COLLECTION}` and `/{COLLECTION}/{id}`.
pub trait Entity: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Payload for create and update.
    type Draft: Serialize + Clone + Debug + Send + Sync + 'static;
    /// Path segment of the collection, e.g. `products`.
    const COLLECTION: &'static str;
    /// Singular noun used in user-facing messages, e.g. `product`.
    const NOUN: &'static str;

    fn id(&self) -> &EntityId;
}

/// Shared HTTP handle plus base URL. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resource<E: Entity>(&self) -> ResourceClient<E> {
        ResourceClient {
            api: self.clone(),
            _entity: PhantomData,
        }
    }

    pub fn products(&self) -> ResourceClient<Product> {
        self.resource()
    }

    pub fn users(&self) -> ResourceClient<User> {
        self.resource()
    }
}

/// list/create/update/delete for one resource type.
#[derive(Clone, Debug)]
pub struct ResourceClient<E> {
    api: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> ResourceClient<E> {
    fn collection_url(&self) -> String {
        format!("{}/{}", self.api.base_url, E::COLLECTION)
    }

    fn item_url(&self, id: &EntityId) -> String {
        format!("{}/{}/{}", self.api.base_url, E::COLLECTION, id)
    }

    pub async fn list(&self) -> Result<Vec<E>> {
        let url = self.collection_url();
        let resp = self.send(Method::GET, &url, None::<&()>).await?;
        Ok(resp.json::<Vec<E>>().await?)
    }

    pub async fn create(&self, draft: &E::Draft) -> Result<E> {
        let url = self.collection_url();
        let resp = self.send(Method::POST, &url, Some(draft)).await?;
        Ok(resp.json::<E>().await?)
    }

    pub async fn update(&self, id: &EntityId, draft: &E::Draft) -> Result<E> {
        let url = self.item_url(id);
        let resp = self.send(Method::PUT, &url, Some(draft)).await?;
        Ok(resp.json::<E>().await?)
    }

    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        let url = self.item_url(id);
        self.send(Method::DELETE, &url, None::<&()>).await?;
        Ok(())
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        tracing::debug!(%method, url, "sending request");
        let mut req = self.api.http.request(method.clone(), url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status: resp.status(),
            });
        }
        Ok(resp)
    }
}
