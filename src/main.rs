use clap::Parser;
use gridframe::cli::{self, Cli};
use gridframe::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref())?;

    // Initialize logging
    init_logging(&config.logging)?;
    tracing::debug!(
        version = gridframe::VERSION,
        built = gridframe::BUILD_DATE,
        "Starting gridframe"
    );

    // Create async runtime
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let mut stdout = std::io::stdout();
        cli::execute(cli, &config, &mut stdout).await
    })
}
