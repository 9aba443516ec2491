use clap::{Args, Subcommand};
use survey_lib::{CachedClient, ClientConfig};

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Forget all cached submission counts
    Clear,
    /// Show where the count cache lives and how it is configured
    Info,
}

pub fn run(args: &CacheArgs, client: &CachedClient, config: &ClientConfig) {
    match args.command {
        CacheCommand::Clear => {
            client.clear_cache();
            eprintln!("Cleared count cache at {}", config.cache_path.display());
        }
        CacheCommand::Info => {
            println!("path:   {}", config.cache_path.display());
            println!("window: {}s", config.cache_window.as_secs());
            println!("policy: {:?}", client.counts().policy());
        }
    }
}
