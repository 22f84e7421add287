//! # Construcción de Respuestas
//! src/protocol/response.rs
//!
//! Cada respuesta es exactamente una línea:
//!
//! ```text
//! OK 3\n
//! ERR unknown command: foo\n
//! ```
//!
//! Una respuesta puede además pedir que se cierre la conexión (`quit`).
//!
//! ## Ejemplo de uso
//!
//! ```
//! use cmd_server::protocol::Response;
//!
//! let response = Response::ok("bye").closing();
//! assert_eq!(response.to_line(), "OK bye\n");
//! assert!(response.closes_connection());
//! ```

use super::Status;

/// Respuesta a un comando
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,

    /// Texto después del estado (sin saltos de línea)
    payload: String,

    /// El servidor cierra la conexión después de enviar esta respuesta
    close: bool,
}

impl Response {
    /// Crea una respuesta con el estado y el payload dados
    ///
    /// Los saltos de línea del payload se reemplazan por espacios para no
    /// romper el framing de una línea por respuesta.
    pub fn new(status: Status, payload: &str) -> Self {
        Self {
            status,
            payload: payload.replace(['\r', '\n'], " "),
            close: false,
        }
    }

    /// Respuesta exitosa
    pub fn ok(payload: &str) -> Self {
        Self::new(Status::Ok, payload)
    }

    /// Respuesta de error
    pub fn error(message: &str) -> Self {
        Self::new(Status::Err, message)
    }

    /// Marca la respuesta para cerrar la conexión después de enviarla
    pub fn closing(mut self) -> Self {
        self.close = true;
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn closes_connection(&self) -> bool {
        self.close
    }

    /// Serializa la respuesta como línea terminada en `\n`
    pub fn to_line(&self) -> String {
        if self.payload.is_empty() {
            format!("{}\n", self.status)
        } else {
            format!("{} {}\n", self.status, self.payload)
        }
    }

    /// Serializa la respuesta a bytes para enviar por el socket
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_line().into_bytes()
    }
}
