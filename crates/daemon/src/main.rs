mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Daemon, Health, Init, Item, Order, Version};

command_enum! {
    (Daemon, Daemon),
    (Health, Health),
    (Init, Init),
    (Item, Item),
    (Order, Order),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Remote: explicit flag > config api_port > 5001. Key: explicit flag > config.
    let settings =
        match cli::op::resolve_settings(args.remote, args.api_key, args.config_path.clone()) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error: Invalid remote URL: {}", e);
                std::process::exit(1);
            }
        };

    let ctx = match cli::op::OpContext::new(settings, args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
