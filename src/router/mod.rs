//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea comandos a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Línea → Request → Router → Handler → Response
//! ```
//!
//! El router busca el handler registrado para el nombre del comando. Si no
//! hay ninguno, ejecuta el handler de fallback, que por defecto responde
//! `ERR unknown command: <nombre>`.

use crate::protocol::{Request, Response};
use crate::workers::AtomicCounter;
use std::collections::HashMap;
use std::sync::Arc;

/// Estado compartido visible para los handlers
pub struct Context<'a> {
    /// Conexiones que se están atendiendo en este momento
    pub active: &'a AtomicCounter,

    /// Id de la conexión que envió el comando
    pub conn_id: u64,
}

/// Tipo de handler
///
/// Un handler recibe el contexto y el Request, y retorna una Response.
pub type Handler = Arc<dyn Fn(&Context<'_>, &Request) -> Response + Send + Sync>;

/// Router que mapea nombres de comando a handlers
pub struct Router {
    /// Mapa de comando → handler
    routes: HashMap<String, Handler>,

    /// Handler para comandos no registrados
    fallback: Handler,
}

impl Router {
    /// Crea un router vacío con el fallback por defecto
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: Arc::new(unknown_command),
        }
    }

    /// Registra un comando con su handler
    ///
    /// El nombre se guarda en minúsculas, igual que lo entrega el parser.
    ///
    /// # Ejemplo
    /// ```
    /// use cmd_server::router::{Context, Router};
    /// use cmd_server::protocol::{Request, Response};
    ///
    /// let mut router = Router::new();
    /// router.register("ping", |_ctx: &Context<'_>, _req: &Request| Response::ok("pong"));
    /// ```
    pub fn register<F>(&mut self, command: &str, handler: F)
    where
        F: Fn(&Context<'_>, &Request) -> Response + Send + Sync + 'static,
    {
        self.routes
            .insert(command.to_ascii_lowercase(), Arc::new(handler));
    }

    /// Reemplaza el handler de fallback
    pub fn set_fallback<F>(&mut self, handler: F)
    where
        F: Fn(&Context<'_>, &Request) -> Response + Send + Sync + 'static,
    {
        self.fallback = Arc::new(handler);
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn dispatch(&self, ctx: &Context<'_>, request: &Request) -> Response {
        let handler = self.routes.get(request.command()).unwrap_or(&self.fallback);
        handler(ctx, request)
    }

    /// Nombres de los comandos registrados, ordenados
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_command(_ctx: &Context<'_>, request: &Request) -> Response {
    Response::error(&format!("unknown command: {}", request.command()))
}
