//! # Errores del Servidor
//! src/error.rs
//!
//! Tipos de error compartidos por la configuración, el pool de workers
//! y el listener TCP.

use thiserror::Error;

/// Errores que pueden ocurrir al configurar o arrancar el servidor
#[derive(Error, Debug)]
pub enum ServerError {
    /// Error de I/O en el listener (bind, accept, local_addr)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuración con valores inválidos
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// El sistema operativo no pudo crear un thread del pool
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(std::io::Error),
}

/// Result con el error del servidor
pub type Result<T> = std::result::Result<T, ServerError>;
