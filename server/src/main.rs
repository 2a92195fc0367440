#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = taskman_server::config::Config::from_env()?;
    taskman_server::web::start_web_server(config).await
}
