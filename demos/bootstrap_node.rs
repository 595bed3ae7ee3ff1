use std::time::Duration;

use cove_client::{bootstrap, client::Client};

const TIMEOUT: u64 = 10; // seconds

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let client = Client::from_env()?;

    // The client has no deadline of its own, so the caller sets one.
    let token =
        tokio::time::timeout(Duration::from_secs(TIMEOUT), bootstrap::lighthouse(&client))
            .await??;

    let client = client.with_token(token);
    println!("{} secrets visible", client.list_secrets().await?.len());

    Ok(())
}
