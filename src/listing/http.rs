//! HTTP listing transport
//!
//! Serves every collection of a service definition as a listing action.
//! Parameters, page size and continuation token travel in the query string
//! for `GET` actions and in a JSON body for `POST` actions; the static
//! parameters of a collection always go in the query string.

use super::extract::{extract_token, take_records, token_to_param, value_to_param};
use super::types::ListingOperation;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::loader::{CollectionDefinition, ServiceDefinition};
use crate::pagination::{ActionParameters, ContinuationToken, RawResult};
use crate::types::{JsonObject, Method};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Listing operation backed by an HTTP service
#[derive(Debug)]
pub struct HttpListing {
    service: String,
    client: HttpClient,
    actions: HashMap<String, CollectionDefinition>,
}

impl HttpListing {
    /// Create a listing over a set of collections
    pub fn new(
        service: impl Into<String>,
        client: HttpClient,
        collections: impl IntoIterator<Item = CollectionDefinition>,
    ) -> Self {
        let actions = collections
            .into_iter()
            .map(|c| (c.action.clone(), c))
            .collect();
        Self {
            service: service.into(),
            client,
            actions,
        }
    }

    /// Create a listing from a loaded service definition
    pub fn from_definition(def: &ServiceDefinition) -> Result<Self> {
        let client = HttpClient::with_config(def.client_config())?;
        Ok(Self::new(&def.name, client, def.collections.iter().cloned()))
    }

    /// Name of the service
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Collection served for a listing action
    pub fn action(&self, action: &str) -> Option<&CollectionDefinition> {
        self.actions.get(action)
    }

    fn build_request(
        &self,
        model: &CollectionDefinition,
        params: &ActionParameters,
        token: Option<&ContinuationToken>,
    ) -> RequestConfig {
        let mut req = model.base_request();

        let pagination = model.pagination.as_ref();
        let size_param = pagination.and_then(|p| p.page_size_param.as_deref());
        if params.page_size.is_some() && size_param.is_none() {
            debug!(action = %params.action, "Collection has no page size parameter, ignoring page size");
        }

        match model.method {
            Method::GET => {
                for (key, value) in &params.params {
                    req = req.query(key, value_to_param(value));
                }
                if let (Some(name), Some(size)) = (size_param, params.page_size) {
                    req = req.query(name, size.to_string());
                }
                if let (Some(p), Some(token)) = (pagination, token) {
                    req = req.query(&p.token_param, token_to_param(token));
                }
            }
            Method::POST => {
                let mut body: JsonObject = params
                    .params
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                if let (Some(name), Some(size)) = (size_param, params.page_size) {
                    body.insert(name.to_string(), Value::from(size));
                }
                if let (Some(p), Some(token)) = (pagination, token) {
                    body.insert(p.token_param.clone(), token.as_value().clone());
                }
                req = req.json(Value::Object(body));
            }
        }

        req
    }
}

#[async_trait]
impl ListingOperation for HttpListing {
    async fn list(
        &self,
        params: &ActionParameters,
        token: Option<&ContinuationToken>,
    ) -> Result<RawResult> {
        let model = self
            .actions
            .get(&params.action)
            .ok_or_else(|| Error::unknown_action(&params.action))?;

        let req = self.build_request(model, params, token);
        debug!(
            service = %self.service,
            action = %params.action,
            path = %model.path,
            "Listing request"
        );

        let mut body: Value = self
            .client
            .request_json(model.method.into(), &model.path, req)
            .await?;

        let next_token = model
            .pagination
            .as_ref()
            .and_then(|p| extract_token(&body, &p.token_path));
        let records = take_records(&mut body, model.records_path.as_deref())?;

        Ok(RawResult::new(records, next_token).with_response(body))
    }
}
