use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    pipellm::logging::init();
    pipellm::run().await
}
