//! Secrets
//!
//! Reads and writes named secrets under `/secrets`.

use hyper::{Method, StatusCode};

use crate::{
    client::{Auth, Client, HTTPClient},
    error::{CoveResult, Error, Operation},
    models::{OperationResponse, SecretEntry, SecretValue, WritePayload},
};

/// Path of secret `id`, percent-encoded as one segment.
fn secret_path(id: &str) -> CoveResult<String> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(Error::Request(format!("invalid secret id {:?}", id)));
    }

    Ok(format!("/secrets/{}", urlencoding::encode(id)))
}

/// Fetch the value of secret `id`.
pub async fn get<T: HTTPClient>(client: &Client<T>, id: &str) -> CoveResult<String> {
    let req = client.request(Method::GET, &secret_path(id)?, Auth::Bearer, None)?;
    let value: SecretValue = client
        .send_json(Operation::GetSecret, req, StatusCode::OK)
        .await?;

    Ok(value.secret)
}

/// List metadata for every secret, in the order the server returns them.
pub async fn all<T: HTTPClient>(client: &Client<T>) -> CoveResult<Vec<SecretEntry>> {
    let req = client.request(Method::GET, "/secrets", Auth::Bearer, None)?;

    client
        .send_json(Operation::ListSecrets, req, StatusCode::OK)
        .await
}

/// Create secret `id` holding `value`. Returns the server's message.
pub async fn add<T: HTTPClient>(client: &Client<T>, id: &str, value: &str) -> CoveResult<String> {
    let payload = WritePayload::new(id, value);
    let req = client.request(
        Method::POST,
        &secret_path(id)?,
        Auth::Bearer,
        Some(&payload),
    )?;
    let res: OperationResponse = client
        .send_json(Operation::AddSecret, req, StatusCode::OK)
        .await?;

    Ok(res.message)
}

/// Replace the value of secret `id`.
pub async fn update<T: HTTPClient>(client: &Client<T>, id: &str, value: &str) -> CoveResult<()> {
    let payload = WritePayload::new(id, value);
    let req = client.request(
        Method::PATCH,
        &secret_path(id)?,
        Auth::Bearer,
        Some(&payload),
    )?;
    client
        .send(Operation::UpdateSecret, req, StatusCode::NO_CONTENT)
        .await?;

    Ok(())
}

/// Delete secret `id`.
///
/// The service expects a write payload on deletes too, so one is sent with
/// an empty `secretValue`.
pub async fn remove<T: HTTPClient>(client: &Client<T>, id: &str) -> CoveResult<()> {
    let payload = WritePayload::new(id, "");
    let req = client.request(
        Method::DELETE,
        &secret_path(id)?,
        Auth::Bearer,
        Some(&payload),
    )?;
    client
        .send(Operation::DeleteSecret, req, StatusCode::NO_CONTENT)
        .await?;

    Ok(())
}

impl<T: HTTPClient> Client<T> {
    /// See [`secrets::get`](get).
    pub async fn get_secret(&self, id: &str) -> CoveResult<String> {
        get(self, id).await
    }

    /// See [`secrets::all`](all).
    pub async fn list_secrets(&self) -> CoveResult<Vec<SecretEntry>> {
        all(self).await
    }

    /// See [`secrets::add`](add).
    pub async fn add_secret(&self, id: &str, value: &str) -> CoveResult<String> {
        add(self, id, value).await
    }

    /// See [`secrets::update`](update).
    pub async fn update_secret(&self, id: &str, value: &str) -> CoveResult<()> {
        update(self, id, value).await
    }

    /// See [`secrets::remove`](remove).
    pub async fn delete_secret(&self, id: &str) -> CoveResult<()> {
        remove(self, id).await
    }
}
