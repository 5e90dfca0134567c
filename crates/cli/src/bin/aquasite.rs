use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    aquasite_cli::main_entry().await
}
