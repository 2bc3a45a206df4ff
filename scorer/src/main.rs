use std::{env, error::Error, process::ExitCode};

use alchemy_transfers::{validate_address, ClientConfig, TransferClient};
use onchain_score::compute_wallet_score;

mod report;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scorer=info,alchemy_transfers=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(address) = env::args().nth(1) else {
        eprintln!("Usage: scorer <address>");
        return ExitCode::FAILURE;
    };

    match run(&address).await {
        Ok(card) => {
            println!("{card}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(address: &str) -> Result<String, Box<dyn Error>> {
    validate_address(address)?;

    let config = ClientConfig::from_env()?;
    let client = TransferClient::new(config);

    let transfers = client.fetch_all(address).await?;
    tracing::info!("Total transfers: {}", transfers.len());

    let score = compute_wallet_score(address, &transfers);
    Ok(report::render(&score))
}
