use rescuescan::app::startup::startup;

#[tokio::main]
async fn main() {
    let exit_code = startup().await;
    std::process::exit(exit_code);
}
