#[tokio::main]
async fn main() {
    let code = toastline::app::startup::run().await;
    std::process::exit(code);
}
