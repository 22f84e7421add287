//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! Implementación de los comandos del servidor:
//! - who: Conexiones activas
//! - time: Timestamp actual
//! - echo: Repetir texto
//! - quit: Cerrar la conexión

use crate::protocol::{Request, Response};
use crate::router::Context;
use std::time::{SystemTime, UNIX_EPOCH};

/// Handler para `who`
///
/// Retorna el número de conexiones que los workers están atendiendo,
/// incluyendo la del cliente que pregunta.
///
/// ```text
/// > who
/// < OK 2
/// ```
pub fn who_handler(ctx: &Context<'_>, _req: &Request) -> Response {
    Response::ok(&ctx.active.read().to_string())
}

/// Handler para `time`
///
/// Retorna el timestamp Unix actual en segundos.
pub fn time_handler(_ctx: &Context<'_>, _req: &Request) -> Response {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => Response::ok(&elapsed.as_secs().to_string()),
        Err(_) => Response::error("system clock is before unix epoch"),
    }
}

/// Handler para `echo <texto>`
pub fn echo_handler(_ctx: &Context<'_>, req: &Request) -> Response {
    if req.args().is_empty() {
        return Response::error("missing required argument: text");
    }

    Response::ok(req.args())
}

/// Handler para `quit`
///
/// Responde y marca la conexión para cerrarse.
pub fn quit_handler(_ctx: &Context<'_>, _req: &Request) -> Response {
    Response::ok("bye").closing()
}
