//! domcheck - extract domains from text and check their mail DNS records

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    domcheck_cli::run().await
}
