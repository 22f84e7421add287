//! # Sistema de Workers
//! src/workers/mod.rs
//!
//! Maquinaria productor/consumidor del servidor:
//! - `queue`: cola circular bloqueante de descriptores de conexión
//! - `counter`: contador thread-safe de conexiones activas
//! - `pool`: pool fijo de threads que drena la cola

pub mod counter;
pub mod pool;
pub mod queue;

pub use counter::AtomicCounter;
pub use pool::WorkerPool;
pub use queue::BlockingRingQueue;
