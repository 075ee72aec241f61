//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing-subscriber` con un `EnvFilter`. El filtro viene de
//! `--log-level` (o `RUST_LOG`); si no se puede parsear se usa `info`.

use tracing_subscriber::EnvFilter;

/// Instala el subscriber global
///
/// Retorna `false` si ya había uno instalado (pasa en los tests).
pub fn init(level: &str) -> bool {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init("debug");
        assert!(!init("not a [valid filter"));
    }
}
