//! Bootstrap
//!
//! First-boot provisioning. A node that holds no credential yet asks the
//! lighthouse endpoint for its bootstrap secret. The request is sent without
//! an `Authorization` header.

use hyper::{Method, StatusCode};

use crate::{
    client::{Auth, Client, HTTPClient},
    error::{CoveResult, Operation},
    models::SecretValue,
};

/// Fetch the bootstrap secret from `/bootstrap/lighthouse`.
pub async fn lighthouse<T: HTTPClient>(client: &Client<T>) -> CoveResult<String> {
    let req = client.request(Method::GET, "/bootstrap/lighthouse", Auth::Anonymous, None)?;
    let value: SecretValue = client
        .send_json(Operation::Bootstrap, req, StatusCode::OK)
        .await?;

    Ok(value.secret)
}

impl<T: HTTPClient> Client<T> {
    /// See [`bootstrap::lighthouse`](lighthouse).
    pub async fn bootstrap(&self) -> CoveResult<String> {
        lighthouse(self).await
    }
}
