//! # Command Server
//! src/lib.rs
//!
//! Servidor de comandos TCP concurrente implementado desde cero para
//! demostrar conceptos de sistemas operativos: productor/consumidor,
//! exclusión mutua, variables de condición y pools de threads.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `workers`: Cola circular bloqueante, contador thread-safe y pool de workers
//! - `protocol`: Parsing de comandos y armado de respuestas (una línea cada uno)
//! - `router`: Enrutamiento de comandos a handlers
//! - `commands`: Implementación de los comandos (who, time, echo, quit)
//! - `server`: Listener TCP, traspaso de conexiones y sesión por conexión
//! - `config`: Argumentos CLI y variables de entorno
//! - `error`: Errores del servidor
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use cmd_server::config::Config;
//! use cmd_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al hacer bind");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod protocol;
pub mod router;
pub mod server;
pub mod workers;
