//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de comandos con soporte
//! completo para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./cmd_server --port 7000 \
//!   --workers 4 \
//!   --queue-capacity 10 \
//!   --queue-growth 4
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! CMD_PORT=7000 CMD_HOST=0.0.0.0 RUST_LOG=debug ./cmd_server
//! ```

use crate::error::{Result, ServerError};
use crate::workers::queue::{DEFAULT_CAPACITY, GROWTH_FACTOR};
use clap::Parser;
use std::time::Duration;
use tracing::info;

/// Configuración del servidor de comandos
#[derive(Debug, Clone, Parser)]
#[command(name = "cmd_server")]
#[command(about = "Servidor de comandos TCP concurrente con pool de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "7000", env = "CMD_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "CMD_HOST")]
    pub host: String,

    // === Workers ===

    /// Número de workers que atienden conexiones
    #[arg(short, long, default_value = "4", env = "CMD_WORKERS")]
    pub workers: usize,

    // === Cola ===

    /// Capacidad inicial de la cola de conexiones
    #[arg(long = "queue-capacity", default_value = "10", env = "CMD_QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    /// Factor por el que crece la cola cuando se llena
    #[arg(long = "queue-growth", default_value = "4", env = "CMD_QUEUE_GROWTH")]
    pub queue_growth: usize,

    // === Timeouts ===

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0", env = "CMD_READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use cmd_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:7000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de lectura, si está configurado
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Valida la configuración
    ///
    /// Retorna `ServerError::InvalidConfig` si hay valores inválidos
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ServerError::InvalidConfig("workers must be >= 1".to_string()));
        }

        if self.queue_capacity == 0 {
            return Err(ServerError::InvalidConfig(
                "queue capacity must be >= 1".to_string(),
            ));
        }

        if self.queue_growth < 2 {
            return Err(ServerError::InvalidConfig(
                "queue growth factor must be >= 2".to_string(),
            ));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(
            address = %self.address(),
            workers = self.workers,
            queue_capacity = self.queue_capacity,
            queue_growth = self.queue_growth,
            read_timeout_ms = self.read_timeout_ms,
            "configuration loaded"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 7000,
            host: "127.0.0.1".to_string(),
            workers: 4,
            queue_capacity: DEFAULT_CAPACITY,
            queue_growth: GROWTH_FACTOR,
            read_timeout_ms: 0,
        }
    }
}
