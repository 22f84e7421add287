//! # Estados de Respuesta
//! src/protocol/status.rs
//!
//! Cada línea de respuesta empieza con uno de dos estados:
//!
//! - **OK**: el comando se ejecutó
//! - **ERR**: comando desconocido, argumentos inválidos o línea malformada

use std::fmt;

/// Estado de una respuesta del protocolo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// El comando se ejecutó correctamente
    Ok,

    /// El comando falló o no se pudo interpretar
    Err,
}

impl Status {
    /// Token que encabeza la línea de respuesta
    ///
    /// # Ejemplo
    /// ```
    /// use cmd_server::protocol::Status;
    /// assert_eq!(Status::Ok.as_str(), "OK");
    /// assert_eq!(Status::Err.as_str(), "ERR");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Err => "ERR",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
