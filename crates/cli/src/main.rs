//! Marketplace client entry point.
//!
//! Thin presentation shell: builds the client from configuration, runs a
//! browse session against the store handles, and tears down. All business
//! logic lives behind the store.

use anyhow::Result;
use client_bootstrap::{AppConfig, Client};
use wallet_core::ConnectOutcome;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let client = Client::builder(config).build()?;

    run(&client).await?;

    client.shutdown().await;
    Ok(())
}

async fn run(client: &Client) -> Result<()> {
    match client.wallet.connect().await {
        ConnectOutcome::Connected(address) => println!("Connected as {address}"),
        ConnectOutcome::AlreadyConnected(address) => println!("Already connected as {address}"),
        ConnectOutcome::Rejected(reason) => {
            println!("Wallet connection failed: {reason}");
            println!("Browsing without a session.");
        }
    }

    client.store.fetch_nfts().await?;
    client.store.fetch_owned_nfts().await?;

    println!("\nMarketplace catalogue:");
    for nft in client.store.nfts().await {
        let listing = match &nft.price {
            Some(price) => format!("listed at {price} SUI"),
            None => "not listed".to_string(),
        };
        println!("  {}  {}  ({listing})", nft.id, nft.name);
    }

    let owned = client.store.owned_nfts().await;
    println!("\nTokens owned by this account: {}", owned.len());
    for nft in owned {
        println!("  {}  {}", nft.id, nft.name);
    }

    Ok(())
}
