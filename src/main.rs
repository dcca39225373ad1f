use clap::Parser;

#[tokio::main]
async fn main() {
    // Values already in the environment win over .env entries.
    let _ = dotenvy::dotenv();

    let cli = mailswitch::cli::Cli::parse();
    if let Err(e) = mailswitch::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
