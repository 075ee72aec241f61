//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto (con `SO_REUSEADDR`)
//! 2. Acepta conexiones y lanza un thread por cada una
//! 3. Lee, parsea y rutea un único request por conexión
//! 4. Escribe la respuesta y cierra

pub mod connection;
pub mod limiter;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::handle_connection;
pub use limiter::ConnectionLimiter;
pub use tcp::Server;
