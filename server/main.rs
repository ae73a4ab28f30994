/// tensor-forge HTTP server
///
/// Exposes the training engine and architecture simulator as a small JSON
/// API on a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin forge-server --release -- --addr 127.0.0.1:7878
///
/// Endpoints:
///   GET  /api/health
///   GET  /api/levels, /api/levels/{id}
///   POST /api/train
///   POST /api/simulate

mod handlers;
mod routes;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tiny_http::Server;
use tracing::info;

use tensor_forge::engine::Engine;
use tensor_forge::level::LevelCatalog;
use tensor_forge::logging;

#[derive(Parser)]
#[command(name = "forge-server", version, about = "JSON API for the tensor-forge engine")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:7878")]
    addr: String,
    /// Level catalog JSON; the built-in levels are used when omitted
    #[arg(long, value_name = "PATH")]
    levels: Option<PathBuf>,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();
    logging::init_logging(args.verbose)?;

    let catalog = match &args.levels {
        Some(path) => LevelCatalog::load_json(path)?,
        None => LevelCatalog::builtin(),
    };
    let engine = Arc::new(Engine::new(catalog));

    let server = Server::http(args.addr.as_str())?;
    info!(addr = %args.addr, levels = ?engine.catalog().ids(), "forge-server listening");

    // The engine is read-only, so every request gets its own thread and a
    // clone of the Arc; a long training run never stalls other calls.
    for request in server.incoming_requests() {
        let engine = Arc::clone(&engine);
        std::thread::spawn(move || {
            routes::dispatch(request, &engine);
        });
    }
    Ok(())
}
