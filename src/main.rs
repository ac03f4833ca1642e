use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = extdir::cli::Cli::parse();
    if let Err(e) = extdir::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
