//! # Contador Thread-Safe
//! src/workers/counter.rs
//!
//! Contador de conexiones activas protegido por un mutex.

use std::sync::{Mutex, PoisonError};

/// Contador compartido entre workers
///
/// Cada operación es una sola sección crítica. No hay chequeo de
/// overflow ni de underflow: quien llama debe emparejar cada
/// `increment` con su `decrement`.
#[derive(Debug, Default)]
pub struct AtomicCounter {
    count: Mutex<i64>,
}

impl AtomicCounter {
    /// Crea un contador en 0
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }

    pub fn decrement(&self) {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner) -= 1;
    }

    /// Valor actual del contador
    pub fn read(&self) -> i64 {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_counter_starts_at_zero() {
        let counter = AtomicCounter::new();
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn test_increment_and_decrement() {
        let counter = AtomicCounter::new();

        counter.increment();
        assert_eq!(counter.read(), 1);

        counter.increment();
        assert_eq!(counter.read(), 2);

        counter.decrement();
        assert_eq!(counter.read(), 1);

        counter.decrement();
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn test_unbalanced_decrement_is_not_guarded() {
        let counter = AtomicCounter::new();
        counter.decrement();
        assert_eq!(counter.read(), -1);
    }

    #[test]
    fn test_concurrent_increments_then_decrements() {
        let counter = Arc::new(AtomicCounter::new());

        let run = |op: fn(&AtomicCounter)| {
            let barrier = Arc::new(Barrier::new(3));
            let handles: Vec<_> = (0..3)
                .map(|_| {
                    let counter = Arc::clone(&counter);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        op(&counter);
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        };

        run(AtomicCounter::increment);
        assert_eq!(counter.read(), 3);

        run(AtomicCounter::decrement);
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn test_counter_balance_under_contention() {
        let counter = Arc::new(AtomicCounter::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.increment();
                    }
                    // La mitad de los threads deshace su trabajo
                    if i % 2 == 0 {
                        for _ in 0..1000 {
                            counter.decrement();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.read(), 4000);
    }
}
