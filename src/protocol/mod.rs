//! # Módulo de Protocolo
//! src/protocol/mod.rs
//!
//! Protocolo ASCII orientado a líneas que hablan los workers con cada
//! cliente. Incluye:
//!
//! - Parsing de la línea de comando
//! - Construcción de la línea de respuesta
//! - Estados de respuesta (OK / ERR)
//!
//! ### Formato de Request
//!
//! ```text
//! <comando> [argumentos]\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! OK <payload>\n
//! ERR <mensaje>\n
//! ```
//!
//! La conexión queda abierta entre comandos hasta que el cliente la cierra
//! o envía `quit`.

pub mod request;
pub mod response;
pub mod status;

pub use request::{ParseError, Request, MAX_LINE_LEN};
pub use response::Response;
pub use status::Status;
