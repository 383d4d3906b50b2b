use clap::Parser;
use livenotes::cli::{handle_add, handle_list, handle_serve, handle_toggle, Cli, Commands};
use livenotes::ServerConfig;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port, db } => handle_serve(ServerConfig::new(host, port, db)),
        Commands::Add {
            title,
            content,
            done,
            db,
            json,
        } => handle_add(title, content, done, &db, json),
        Commands::List { db, json } => handle_list(&db, json),
        Commands::Toggle { id, db, json } => handle_toggle(id, &db, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
