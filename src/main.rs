use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    vecscan::app::startup::startup().await
}
