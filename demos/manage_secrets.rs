use cove_client::{client::Client, error::CoveResult, secrets};

const DEMO_KEY: &str = "demo-api-key";

#[tokio::main]
async fn main() -> CoveResult<()> {
    env_logger::init();

    let client = Client::from_env()?;

    let msg = secrets::add(&client, DEMO_KEY, "smelly-socks").await?;
    println!("add: {}", msg);

    client.update_secret(DEMO_KEY, "clean-socks").await?;
    assert_eq!(client.get_secret(DEMO_KEY).await?, "clean-socks");

    for entry in client.list_secrets().await? {
        println!(
            "{:<24} v{:<4} pulled {:<4} added {} modified {}",
            entry.key,
            entry.version.map(|v| v.to_string()).unwrap_or_default(),
            entry.times_pulled.unwrap_or_default(),
            entry.date_added,
            entry.last_modified,
        );
    }

    // Just as a clean up measure, we remove the secret created in this example
    secrets::remove(&client, DEMO_KEY).await?;

    Ok(())
}
