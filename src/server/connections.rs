//! # Tabla de Conexiones
//! src/server/connections.rs
//!
//! Traspaso de sockets del listener a los workers. La cola solo transporta
//! enteros, así que el listener deja el `TcpStream` en esta tabla y encola
//! su id; el worker que lo saque de la cola toma el socket con `take`.

use std::collections::HashMap;
use std::net::TcpStream;
use std::sync::{Mutex, PoisonError};

/// Identificador de una conexión aceptada
pub type ConnId = u64;

#[derive(Default)]
struct Table {
    next_id: ConnId,
    streams: HashMap<ConnId, TcpStream>,
}

/// Conexiones aceptadas que todavía no tomó ningún worker
#[derive(Default)]
pub struct ConnectionTable {
    inner: Mutex<Table>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarda el socket y retorna su id (creciente, nunca se reutiliza)
    pub fn register(&self, stream: TcpStream) -> ConnId {
        let mut table = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = table.next_id;
        table.next_id += 1;
        table.streams.insert(id, stream);
        id
    }

    /// Saca el socket de la tabla; `None` si el id no existe o ya se tomó
    pub fn take(&self, id: ConnId) -> Option<TcpStream> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .streams
            .remove(&id)
    }

    /// Número de conexiones esperando un worker
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .streams
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
