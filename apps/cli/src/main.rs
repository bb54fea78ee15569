#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mycoquiz_cli::run().await
}
