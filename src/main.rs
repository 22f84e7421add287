//! # Command Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de comandos.
//!
//! La configuración viene de argumentos CLI o variables de entorno y el
//! nivel de logs de `RUST_LOG` (por defecto `info`).

use cmd_server::config::Config;
use cmd_server::server::Server;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_thread_names(true)
        .init();

    println!("=================================");
    println!("  Command Server");
    println!("  Principios de Sistemas Operativos");
    println!("=================================\n");

    let config = Config::new();
    config.log_summary();

    let result = Server::bind(config).and_then(|server| server.run());

    if let Err(e) = result {
        error!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
