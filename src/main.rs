#[tokio::main]
async fn main() {
    lebanon_tourism::run().await;
}
