//! # Pool de Workers
//! src/workers/pool.rs
//!
//! N threads de larga vida que drenan la cola de conexiones.
//!
//! ```text
//! loop {
//!     id = queue.pop()        // bloquea hasta que el listener haga push
//!     counter.increment()
//!     handler(id)             // atiende la conexión hasta que se cierre
//!     counter.decrement()
//! }
//! ```

use crate::error::{Result, ServerError};
use crate::workers::{AtomicCounter, BlockingRingQueue};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};

/// Pool fijo de workers
///
/// Los threads viven lo mismo que el proceso: no se hace join ni se
/// detienen. Soltar el `WorkerPool` no los termina.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Lanza `size` workers sobre la cola y el contador dados
    ///
    /// `handler` recibe cada valor sacado de la cola. Los errores de I/O
    /// deben quedar contenidos dentro del handler; si aun así hace panic,
    /// el worker lo atrapa, lo registra y sigue atendiendo la cola.
    ///
    /// # Errores
    ///
    /// Retorna `ServerError::Spawn` si el sistema operativo no pudo crear
    /// alguno de los threads.
    pub fn start<T, F>(
        queue: Arc<BlockingRingQueue<T>>,
        counter: Arc<AtomicCounter>,
        size: usize,
        handler: F,
    ) -> Result<Self>
    where
        T: Copy + Default + std::fmt::Debug + Send + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let mut handles = Vec::with_capacity(size);

        for i in 0..size {
            let name = format!("worker-{}", i);
            let queue = Arc::clone(&queue);
            let counter = Arc::clone(&counter);
            let handler = Arc::clone(&handler);

            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || Self::worker_loop(name, queue, counter, handler))
                .map_err(ServerError::Spawn)?;

            handles.push(handle);
        }

        info!(workers = size, "worker pool started");
        Ok(Self { handles })
    }

    /// Loop principal del worker
    fn worker_loop<T, F>(
        name: String,
        queue: Arc<BlockingRingQueue<T>>,
        counter: Arc<AtomicCounter>,
        handler: Arc<F>,
    ) where
        T: Copy + Default + std::fmt::Debug,
        F: Fn(T),
    {
        debug!(worker = %name, "🔧 worker started");

        loop {
            let item = queue.pop();
            debug!(worker = %name, ?item, "picked up connection");

            counter.increment();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (*handler)(item)));
            counter.decrement();

            if outcome.is_err() {
                error!(worker = %name, ?item, "handler panicked; worker keeps running");
            }
        }
    }

    /// Número de workers del pool
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Nombres de los threads del pool
    pub fn worker_names(&self) -> Vec<String> {
        self.handles
            .iter()
            .filter_map(|handle| handle.thread().name().map(str::to_string))
            .collect()
    }
}
