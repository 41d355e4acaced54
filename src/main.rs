use anyhow::Context;
use clap::Parser;
use slack_export::cli::{exit_code, Cli};
use slack_export::export::RunContext;
use slack_export::observability::{init_tracing, LogFormat};
use slack_export::transport::{HttpTransport, ReqwestTransport};
use slack_export::ExportConfig;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing(LogFormat::from_env());

    let cli = Cli::parse();
    let ctx = RunContext::new();

    let config = ExportConfig::from_env();
    let timeout = config
        .as_ref()
        .map(|c| c.timeout)
        .unwrap_or(Duration::from_secs(slack_export::DEFAULT_TIMEOUT_SECS));

    let transport = match build_transport(timeout) {
        Ok(transport) => transport,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut sink = cli.sink(&ctx);
    let result = cli.run(&ctx, config, transport, sink.as_mut()).await;
    exit_code(&result)
}

fn build_transport(timeout: Duration) -> anyhow::Result<Arc<dyn HttpTransport>> {
    let transport = ReqwestTransport::new(timeout).context("failed to build HTTP client")?;
    Ok(Arc::new(transport))
}
