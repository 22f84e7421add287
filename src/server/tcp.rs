//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP con un pool fijo de workers. El thread
//! del listener acepta conexiones y encola su id; cada worker saca un id de
//! la cola y atiende esa conexión hasta que se cierre.
//!
//! ```text
//! listener ──push(id)──> BlockingRingQueue ──pop()──> worker-0..N
//!     │                                                  │
//!     └──register(stream)──> ConnectionTable <──take(id)─┘
//! ```

use crate::commands;
use crate::config::Config;
use crate::error::Result;
use crate::router::{Context, Router};
use crate::server::connections::{ConnId, ConnectionTable};
use crate::server::session;
use crate::workers::{AtomicCounter, BlockingRingQueue, WorkerPool};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Servidor de comandos con pool de workers
pub struct Server {
    config: Config,
    listener: TcpListener,
    queue: Arc<BlockingRingQueue<ConnId>>,
    counter: Arc<AtomicCounter>,
    connections: Arc<ConnectionTable>,
    router: Arc<Router>,
}

impl Server {
    /// Valida la configuración y hace bind del listener
    ///
    /// Los workers recién se lanzan en `run`.
    pub fn bind(config: Config) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(config.address())?;
        info!(address = %listener.local_addr()?, "🚀 server listening");

        Ok(Self {
            queue: Arc::new(BlockingRingQueue::with_capacity(
                config.queue_capacity,
                config.queue_growth,
            )),
            counter: Arc::new(AtomicCounter::new()),
            connections: Arc::new(ConnectionTable::new()),
            router: Arc::new(commands::router()),
            listener,
            config,
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Conexiones que los workers están atendiendo ahora
    pub fn active_connections(&self) -> i64 {
        self.counter.read()
    }

    /// Conexiones aceptadas que esperan un worker libre
    pub fn pending_connections(&self) -> usize {
        self.queue.len()
    }

    /// Lanza el pool y acepta conexiones para siempre
    ///
    /// Solo retorna error si no se pudo lanzar el pool. Los errores de
    /// `accept` se registran y el loop sigue.
    pub fn run(&self) -> Result<()> {
        let pool = self.start_workers()?;
        info!(workers = pool.size(), "accepting connections");

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.enqueue(stream),
                Err(e) => warn!(error = %e, "failed to accept connection"),
            }
        }

        Ok(())
    }

    /// Registra el socket y encola su id para los workers
    fn enqueue(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let id = self.connections.register(stream);
        self.queue.push(id);

        debug!(conn = id, %peer, pending = self.queue.len(), "connection queued");
    }

    fn start_workers(&self) -> Result<WorkerPool> {
        let connections = Arc::clone(&self.connections);
        let router = Arc::clone(&self.router);
        let counter = Arc::clone(&self.counter);
        let read_timeout = self.config.read_timeout();

        WorkerPool::start(
            Arc::clone(&self.queue),
            Arc::clone(&self.counter),
            self.config.workers,
            move |id| Self::handle_connection(id, &connections, &router, &counter, read_timeout),
        )
    }

    /// Handler que ejecuta cada worker por conexión
    ///
    /// Todo error de I/O queda acá: se registra y la conexión se cierra.
    fn handle_connection(
        id: ConnId,
        connections: &ConnectionTable,
        router: &Router,
        counter: &AtomicCounter,
        read_timeout: Option<Duration>,
    ) {
        let Some(stream) = connections.take(id) else {
            warn!(conn = id, "connection id not found in table");
            return;
        };

        if let Err(e) = stream.set_read_timeout(read_timeout) {
            warn!(conn = id, error = %e, "failed to set read timeout");
            return;
        }

        info!(conn = id, active = counter.read(), "✅ serving connection");

        let ctx = Context {
            active: counter,
            conn_id: id,
        };

        match session::serve(stream, router, &ctx) {
            Ok(()) => info!(conn = id, "connection closed"),
            Err(e) => warn!(conn = id, error = %e, "❌ connection ended with error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};

    fn test_config() -> Config {
        Config {
            port: 0,
            workers: 2,
            ..Config::default()
        }
    }

    fn spawn_server(config: Config) -> SocketAddr {
        let server = Server::bind(config).expect("bind");
        let addr = server.local_addr().unwrap();
        std::thread::spawn(move || server.run());
        addr
    }

    fn roundtrip(reader: &mut BufReader<TcpStream>, command: &str) -> String {
        reader.get_mut().write_all(command.as_bytes()).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        line
    }

    #[test]
    fn test_bind_rejects_invalid_config() {
        let config = Config {
            workers: 0,
            ..test_config()
        };
        assert!(Server::bind(config).is_err());
    }

    #[test]
    fn test_bind_reports_ephemeral_port() {
        let server = Server::bind(test_config()).unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
        assert_eq!(server.active_connections(), 0);
        assert_eq!(server.pending_connections(), 0);
    }

    #[test]
    fn test_handle_connection_unknown_id() {
        let table = ConnectionTable::new();
        let counter = AtomicCounter::new();
        // No debe hacer panic
        Server::handle_connection(42, &table, &commands::router(), &counter, None);
    }

    #[test]
    fn test_served_connection_answers_echo() {
        let addr = spawn_server(test_config());

        let mut reader = BufReader::new(TcpStream::connect(addr).unwrap());
        assert_eq!(roundtrip(&mut reader, "echo hola\n"), "OK hola\n");
        assert_eq!(roundtrip(&mut reader, "quit\n"), "OK bye\n");
    }

    #[test]
    fn test_read_timeout_closes_idle_connection() {
        let addr = spawn_server(Config {
            read_timeout_ms: 100,
            ..test_config()
        });

        let mut reader = BufReader::new(TcpStream::connect(addr).unwrap());
        assert_eq!(roundtrip(&mut reader, "echo x\n"), "OK x\n");

        // Sin enviar nada, el worker corta la conexión por timeout
        let mut line = String::new();
        let read = reader.read_line(&mut line).unwrap_or(0);
        assert_eq!(read, 0);
    }
}
