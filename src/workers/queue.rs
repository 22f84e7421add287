//! # Cola Circular Bloqueante
//! src/workers/queue.rs
//!
//! Cola FIFO thread-safe de descriptores de conexión. El listener es el
//! único productor y los workers del pool son los consumidores.
//!
//! ## Representación
//!
//! ```text
//!   back (siguiente lectura)     front (siguiente escritura)
//!        v                            v
//! [ .  | 7  | 8  | 9  | 10 | 11 | .  | .  ]
//! ```
//!
//! La cola está vacía cuando `front == back`. Nunca se permite que el buffer
//! quede lleno sin crecer: si al avanzar `front` chocaría con `back`, el push
//! reemplaza el buffer por uno más grande y rebasa los índices a 0.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Capacidad inicial por defecto
pub const DEFAULT_CAPACITY: usize = 10;

/// Factor de crecimiento por defecto
pub const GROWTH_FACTOR: usize = 4;

/// Estado protegido por el mutex de la cola
struct RingState<T> {
    /// Buffer circular (su largo es la capacidad actual)
    values: Vec<T>,

    /// Siguiente slot de escritura
    front: usize,

    /// Siguiente slot de lectura
    back: usize,
}

impl<T: Copy + Default> RingState<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: vec![T::default(); capacity],
            front: 0,
            back: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.values.len()
    }

    fn is_empty(&self) -> bool {
        self.front == self.back
    }

    fn len(&self) -> usize {
        (self.front + self.capacity() - self.back) % self.capacity()
    }

    /// Escribe `value` en `front` y avanza. Retorna true si hubo que crecer.
    fn push(&mut self, value: T, growth_factor: usize) -> bool {
        let capacity = self.capacity();
        self.values[self.front] = value;

        let candidate = (self.front + 1) % capacity;
        if candidate == self.back {
            // Todos los slots están ocupados, incluido el recién escrito.
            // grow() deja `front` después de ese slot.
            self.grow(capacity.saturating_mul(growth_factor), capacity);
            true
        } else {
            self.front = candidate;
            false
        }
    }

    /// Saca el elemento en `back`. La cola no debe estar vacía.
    fn take(&mut self) -> T {
        let value = self.values[self.back];
        self.back = (self.back + 1) % self.capacity();
        value
    }

    /// Reemplaza el buffer por uno de `new_capacity` slots.
    ///
    /// Copia los `live` elementos que empiezan en `back`, en orden lógico,
    /// recorriendo el buffer viejo con módulo de la capacidad vieja. Luego
    /// `back` queda en 0 y `front` justo después del último copiado.
    ///
    /// Solo se llama con el mutex tomado (vive dentro de `RingState`). La
    /// capacidad nueva se ajusta a `live + 1` como mínimo, así que nunca se
    /// descartan elementos.
    fn grow(&mut self, new_capacity: usize, live: usize) {
        let old_capacity = self.capacity();
        let new_capacity = new_capacity.max(live + 1);

        let mut values = vec![T::default(); new_capacity];
        for (offset, slot) in values.iter_mut().take(live).enumerate() {
            *slot = self.values[(self.back + offset) % old_capacity];
        }

        self.values = values;
        self.back = 0;
        self.front = live;
    }
}

/// Cola FIFO circular, bloqueante y que crece según demanda
///
/// - `push` nunca falla ni espera en la condición (solo compite por el lock).
/// - `pop` bloquea al thread llamador hasta que haya un valor disponible.
///
/// # Ejemplo
/// ```
/// use cmd_server::workers::BlockingRingQueue;
///
/// let queue = BlockingRingQueue::new();
/// queue.push(3u64);
/// queue.push(4u64);
/// assert_eq!(queue.pop(), 3);
/// assert_eq!(queue.pop(), 4);
/// ```
pub struct BlockingRingQueue<T> {
    state: Mutex<RingState<T>>,

    /// Se señaliza cada vez que la cola deja de estar vacía
    ready: Condvar,

    growth_factor: usize,
}

impl<T: Copy + Default> BlockingRingQueue<T> {
    /// Crea una cola vacía con la capacidad y el factor por defecto
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, GROWTH_FACTOR)
    }

    /// Crea una cola vacía con capacidad y factor de crecimiento dados
    ///
    /// Una capacidad 0 se trata como 1 (que crece en el primer push) y un
    /// factor menor a 2 se trata como 2.
    pub fn with_capacity(capacity: usize, growth_factor: usize) -> Self {
        Self {
            state: Mutex::new(RingState::with_capacity(capacity.max(1))),
            ready: Condvar::new(),
            growth_factor: growth_factor.max(2),
        }
    }

    // Un panic dentro de la sección crítica no deja el estado a medias:
    // los índices solo se actualizan después de escribir el buffer.
    fn lock(&self) -> MutexGuard<'_, RingState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Encola un valor y despierta a un consumidor en espera
    pub fn push(&self, value: T) {
        let mut state = self.lock();

        let previous = state.capacity();
        if state.push(value, self.growth_factor) {
            debug!(from = previous, to = state.capacity(), "queue grown");
        }

        self.ready.notify_one();
    }

    /// Desencola el valor más antiguo
    ///
    /// Bloquea hasta que haya un valor disponible. Si nadie vuelve a hacer
    /// push, espera para siempre.
    pub fn pop(&self) -> T {
        let mut state = self.lock();

        while state.is_empty() {
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        state.take()
    }

    /// Snapshot: la cola estaba vacía al momento de consultar
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot del número de elementos encolados
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Snapshot de la capacidad actual del buffer
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }
}

impl<T: Copy + Default> Default for BlockingRingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{mpsc, Arc};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_queue_is_empty() {
        let queue: BlockingRingQueue<u64> = BlockingRingQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_fifo_order() {
        let queue = BlockingRingQueue::new();
        queue.push(1u64);
        queue.push(2u64);
        queue.push(3u64);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), 1);
        assert_eq!(queue.pop(), 2);
        assert_eq!(queue.pop(), 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_growth_preserves_contents() {
        let queue = BlockingRingQueue::new();
        let total = DEFAULT_CAPACITY as u64 + 3;

        for value in 0..total {
            queue.push(value);
        }

        assert!(queue.capacity() > DEFAULT_CAPACITY, "should have grown");
        assert_eq!(queue.len(), total as usize);

        for expected in 0..total {
            assert_eq!(queue.pop(), expected);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_grows_exactly_when_buffer_would_fill() {
        let queue = BlockingRingQueue::with_capacity(4, 4);

        // capacity - 1 elementos caben sin crecer
        for value in 0..3u64 {
            queue.push(value);
        }
        assert_eq!(queue.capacity(), 4);

        queue.push(3);
        assert_eq!(queue.capacity(), 16);
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_growth_after_wraparound() {
        let queue = BlockingRingQueue::with_capacity(4, 2);

        // Mover back y front hacia el final del buffer
        queue.push(100u64);
        queue.push(101u64);
        queue.push(102u64);
        assert_eq!(queue.pop(), 100);
        assert_eq!(queue.pop(), 101);

        // front da la vuelta y termina chocando con back
        queue.push(103);
        queue.push(104);
        queue.push(105);
        assert_eq!(queue.capacity(), 8);

        for expected in 102..=105 {
            assert_eq!(queue.pop(), expected);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_capacity_one_grows_on_first_push() {
        let queue = BlockingRingQueue::with_capacity(1, 4);
        assert_eq!(queue.capacity(), 1);

        queue.push(7u64);
        assert_eq!(queue.capacity(), 4);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), 7);
    }

    #[test]
    fn test_zero_capacity_and_small_growth_are_clamped() {
        let queue = BlockingRingQueue::with_capacity(0, 1);
        assert_eq!(queue.capacity(), 1);

        queue.push(1u64);
        assert_eq!(queue.capacity(), 2);
        queue.push(2u64);
        assert_eq!(queue.capacity(), 4);

        assert_eq!(queue.pop(), 1);
        assert_eq!(queue.pop(), 2);
    }

    #[test]
    fn test_pop_blocks_until_push() {
        let queue = Arc::new(BlockingRingQueue::new());
        let (tx, rx) = mpsc::channel();

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let value: u64 = queue.pop();
                tx.send(value).unwrap();
            })
        };

        // Sin push, el consumidor sigue bloqueado
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        assert!(!consumer.is_finished());

        queue.push(42);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
        consumer.join().unwrap();
    }

    #[test]
    fn test_one_producer_three_consumers() {
        let queue = Arc::new(BlockingRingQueue::new());

        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.pop())
            })
            .collect();

        queue.push(1u64);
        queue.push(2u64);
        queue.push(3u64);

        let received: HashSet<u64> = consumers
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(received, HashSet::from([1, 2, 3]));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_many_values_many_consumers_no_loss_no_duplicates() {
        let queue = Arc::new(BlockingRingQueue::with_capacity(2, 2));
        let per_consumer = 250;
        let consumers = 4;

        let handles: Vec<_> = (0..consumers)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    (0..per_consumer).map(|_| queue.pop()).collect::<Vec<u64>>()
                })
            })
            .collect();

        for value in 0..(per_consumer * consumers) as u64 {
            queue.push(value);
        }

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        all.sort_unstable();

        let expected: Vec<u64> = (0..(per_consumer * consumers) as u64).collect();
        assert_eq!(all, expected);
    }
}
