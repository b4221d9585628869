use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fraud_check_ui::api::predictor::{PredictionApi, PredictorClient};
use fraud_check_ui::app::App;
use fraud_check_ui::commands::{self, Flow};
use fraud_check_ui::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fraud_check_ui=debug,reqwest=warn")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting fraud check UI...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let client = match config.request_timeout {
        Some(timeout) => match PredictorClient::with_timeout(&config.api_base_url, timeout) {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to create prediction client: {}", e);
                return;
            }
        },
        None => PredictorClient::new(&config.api_base_url),
    };
    info!("Prediction backend: {}", client.base_url());

    let api: Arc<dyn PredictionApi> = Arc::new(client);
    let app = App::bootstrap(config, api);

    println!("{}", commands::HELP_TEXT);
    println!("{}", commands::take_page_output(&app.page));

    let mut tasks = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };

                let flow = commands::parse_event(&line)
                    .and_then(|event| match event {
                        Some(event) => commands::handle_event(&app, event, &mut tasks),
                        None => Ok(Flow::Continue),
                    });

                match flow {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => {
                        warn!("Command failed: {}", e);
                        println!("❌ {}", e);
                    }
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    error!("Submission task failed: {}", e);
                }
            }
        }
    }

    // Let in-flight requests settle so their results still reach the page
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!("Submission task failed: {}", e);
        }
    }

    info!("Goodbye");
}
