//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones y las encola para el pool de workers
//! 3. Atiende cada conexión línea por línea (una sesión por worker)

pub mod connections;
pub mod session;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connections::{ConnId, ConnectionTable};
pub use tcp::Server;
