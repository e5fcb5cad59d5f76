#[tokio::main]
async fn main() {
    if let Err(e) = kaizen_functions_lib::run().await {
        eprintln!("kaizen-functions: {}", e);
        std::process::exit(1);
    }
}
