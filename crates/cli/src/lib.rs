mod locate;

pub use locate::LocateArgs;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "extkit",
    version,
    about = "Locates the JDK an editor extension should run its language servers on",
    long_about = "extkit resolves a usable JDK from an explicit setting, the JDK_HOME/JAVA_HOME \
                  environment variables or the platform's usual install locations, then checks \
                  its major version by running `java -version`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a JDK home and print it with its major version
    #[command(
        long_about = "Resolves a JDK the same way the extension does at activation. \
                            Prints the JDK home and major version, or the reason no usable JDK was found."
    )]
    Locate(LocateArgs),
    /// Start the Language Server Protocol (LSP) server
    Lsp {
        /// JSON settings file; the `extkit.java` section configures the lookup
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Lsp { .. } => "lsp",
        Commands::Locate(_) => "cli",
    };
    let _guard = extkit_runtime::init_logging(component);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Locate(args) => rt.block_on(locate::run(args)),
        Commands::Lsp { settings } => rt.block_on(async {
            let (settings, _) = locate::load_settings(settings.as_deref()).await?;
            extkit_lsp::run_server(extkit_runtime::build_default_locator(), settings).await
        }),
    }
}
