#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bursary::bootstrapper::run().await
}
