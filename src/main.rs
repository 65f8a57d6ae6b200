use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use release_registrar::run::{self, RunError};
use release_registrar::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "release_registrar=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run::execute(&settings).await {
        Ok(issue) => {
            tracing::info!("created issue #{} ({})", issue.number, issue.url);
            ExitCode::SUCCESS
        }
        Err(RunError::Api(e)) if e.is_auth_failure() => {
            tracing::error!("{e} (check the token's access to the index repository)");
            ExitCode::FAILURE
        }
        Err(RunError::Api(e)) if e.is_not_found() => {
            tracing::error!("{e} (index repository or template file missing)");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
