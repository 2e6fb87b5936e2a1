pub use mcp_relay::relay::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    mcp_relay::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
