//! # Límite de Conexiones
//! src/server/limiter.rs
//!
//! Contador de conexiones activas con permisos RAII. Con `max == 0` no
//! hay límite (solo se cuentan); con `max > 0` las conexiones que exceden
//! el límite no reciben permiso y el servidor responde 503.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Limitador compartido entre el accept loop y los threads de conexión
#[derive(Debug, Clone)]
pub struct ConnectionLimiter {
    active: Arc<AtomicUsize>,
    max: usize,
}

/// Permiso de una conexión; se libera al hacer drop
#[derive(Debug)]
pub struct ConnectionPermit {
    active: Arc<AtomicUsize>,
}

impl ConnectionLimiter {
    pub fn new(max: usize) -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            max,
        }
    }

    /// Intenta reservar un lugar para una conexión nueva
    pub fn try_acquire(&self) -> Option<ConnectionPermit> {
        let max = self.max;

        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (max == 0 || n < max).then_some(n + 1)
            })
            .ok()
            .map(|_| ConnectionPermit {
                active: Arc::clone(&self.active),
            })
    }

    /// Conexiones activas en este momento
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for ConnectionPermit {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}
