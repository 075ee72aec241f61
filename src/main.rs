//! # minihttp - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y arranca el accept loop.

use minihttp::config::Config;
use minihttp::logging;
use minihttp::server::Server;
use tracing::error;

fn main() {
    let config = Config::new();

    logging::init(&config.log_level);
    config.log_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "no se pudo iniciar el servidor");
            std::process::exit(1);
        }
    };

    // Esto bloquea el thread principal
    if let Err(e) = server.run() {
        error!(error = %e, "error fatal");
        std::process::exit(1);
    }
}
