//! # Comandos del Servidor
//! src/commands/mod.rs
//!
//! Este módulo contiene los cuatro comandos que el servidor entiende y
//! el armado del router con todos ellos registrados.
//!
//! Cada comando es una función handler que recibe el contexto y el
//! Request, y retorna una Response.

pub mod basic;

pub use basic::*;

use crate::router::Router;

/// Crea un router con `who`, `time`, `echo` y `quit` registrados
pub fn router() -> Router {
    let mut router = Router::new();

    router.register("who", who_handler);
    router.register("time", time_handler);
    router.register("echo", echo_handler);
    router.register("quit", quit_handler);

    router
}
