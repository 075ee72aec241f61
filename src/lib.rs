//! # minihttp
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero sobre sockets TCP:
//! el parsing de requests y la construcción de responses se hacen a mano,
//! sin librerías HTTP.
//!
//! ## Arquitectura
//!
//! - `http`: codecs de headers y body, parsing de requests, responses
//! - `router`: tabla de rutas (exactas y con comodín)
//! - `handlers`: lógica de cada ruta (echo, user-agent, archivos)
//! - `server`: accept loop, driver de conexión y límite de conexiones
//! - `config`: argumentos CLI y variables de entorno
//! - `logging`: inicialización de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use minihttp::config::Config;
//! use minihttp::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al iniciar servidor");
//! server.run().expect("Error en el accept loop");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
