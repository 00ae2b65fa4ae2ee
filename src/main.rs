#[tokio::main]
async fn main() -> anyhow::Result<()> {
    persona_chat_relay::run().await
}
