#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]
#![deny(unstable_features)]
#![warn(rust_2018_idioms, future_incompatible, nonstandard_style)]

//! cove-client is a Rust client for the Cove secrets-management service.
//!
//! # High-level features
//!
//! - Based on [`tokio`], [`hyper`] and [`hyper_rustls`] by default.
//! - [`hyper`] can be replaced using the [`HTTPClient`](client::HTTPClient) interface.
//! - Every call is a single request; there are no retries and nothing is cached.
//!
//! ## Details
//!
//! - Secrets are read and written through the functions in [`secrets`], or the
//!   matching methods on [`Client`](client::Client).
//!
//!   ```
//!   use cove_client::{client::Client, error::CoveResult, secrets};
//!
//!   async fn rotate(client: &Client, id: &str, value: &str) -> CoveResult<String> {
//!       let previous = secrets::get(client, id).await?;
//!       client.update_secret(id, value).await?;
//!
//!       Ok(previous)
//!   }
//!   #
//!   # fn main() {}
//!   ```
//!
//! - A freshly provisioned node without a token uses [`bootstrap`]. No
//!   `Authorization` header is sent.
//!
//!   ```
//!   use cove_client::{bootstrap, client::Client, error::CoveResult};
//!
//!   async fn first_boot(base_url: &str) -> CoveResult<Client> {
//!       let anonymous = Client::new(base_url, "");
//!       let token = bootstrap::lighthouse(&anonymous).await?;
//!
//!       Ok(Client::new(base_url, token))
//!   }
//!   #
//!   # fn main() {}
//!   ```
//!
//! - Errors keep the status code and, for writes, the response body as fields:
//!
//!   ```
//!   use cove_client::{client::Client, error::CoveResult};
//!
//!   async fn ensure_deleted(client: &Client, id: &str) -> CoveResult<()> {
//!       match client.delete_secret(id).await {
//!           Err(e) if e.status() == Some(404) => Ok(()),
//!           other => other,
//!       }
//!   }
//!   #
//!   # fn main() {}
//!   ```

//! # Examples
//!
//! Refer to `./demos`

pub mod bootstrap;
pub mod client;
pub mod error;
pub mod models;
pub mod secrets;

pub use client::Client;
pub use error::{CoveResult, Error};
