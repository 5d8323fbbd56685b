use clap::{Parser, Subcommand};
use dashboard::QueryClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{backend_config, run_health, run_query, text, ReqwestTransport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Query the space mission dashboard backend")]
struct Args {
    /// Backend base URL (default: $SPACE_MISSION_BACKEND_URL, then http://localhost:8000)
    #[arg(long)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask a natural-language question about space missions
    Query {
        text: String,

        /// Print the backend response body as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the backend is up
    Health,

    /// List the launch sites shown on the globe
    Sites,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main(Args::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn real_main(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = backend_config(args.backend_url.as_deref());
    info!(backend = config.base_url(), "using backend");
    let client = QueryClient::new(config, ReqwestTransport::default());

    let output = match args.command {
        Command::Query { text: query, json } => run_query(&client, &query, json).await?,
        Command::Health => run_health(&client).await?,
        Command::Sites => text::render_sites(),
    };
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
