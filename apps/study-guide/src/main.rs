#[tokio::main]
async fn main() -> anyhow::Result<()> {
    study_guide::run().await
}
