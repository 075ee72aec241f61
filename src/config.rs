//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y
//! variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./minihttp --directory /tmp/files --port 4221
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! SERVE_DIRECTORY=/tmp/files HTTP_PORT=8080 ./minihttp
//! ```
//!
//! Los handlers de archivos son los únicos que leen `directory`; el resto
//! de campos los consume el servidor TCP.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errores de validación de la configuración
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("buffer size must be >= 1")]
    ZeroBufferSize,

    #[error("serve directory is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "minihttp")]
#[command(about = "Servidor HTTP/1.1 mínimo: echo, user-agent y archivos")]
#[command(version)]
pub struct Config {
    /// Directorio desde donde se sirven/escriben archivos (/files/*)
    #[arg(long, env = "SERVE_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    // === Lectura ===

    /// Tamaño del buffer de la primera lectura de cada conexión
    #[arg(long = "buffer-size", default_value = "1024", env = "READ_BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Content-Length máximo aceptado (mayores responden 413)
    #[arg(long = "max-body-bytes", default_value = "1048576", env = "MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Timeout de lectura en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    // === Concurrencia ===

    /// Máximo de conexiones simultáneas (0 = sin límite); el exceso recibe 503
    #[arg(long = "max-connections", default_value = "0", env = "MAX_CONNECTIONS")]
    pub max_connections: usize,

    // === Logging ===

    /// Filtro de logs (sintaxis de `tracing_subscriber::EnvFilter`)
    #[arg(long = "log-level", default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use minihttp::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de lectura, si está configurado
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    /// Valida la configuración
    ///
    /// Un `directory` ausente es válido: los handlers de archivos
    /// responderán 500 en lugar de tumbar el proceso.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }

        if let Some(dir) = &self.directory {
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir.clone()));
            }
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(
            address = %self.address(),
            directory = ?self.directory,
            buffer_size = self.buffer_size,
            max_body_bytes = self.max_body_bytes,
            "configuración cargada"
        );

        if self.max_connections > 0 {
            info!(max_connections = self.max_connections, "límite de conexiones activo");
        } else {
            info!("conexiones sin límite: un thread por conexión");
        }

        if let Some(timeout) = self.read_timeout() {
            info!(?timeout, "timeout de lectura activo");
        }
    }
}

impl Default for Config {
    /// Configuración por defecto (la misma que el CLI sin argumentos)
    fn default() -> Self {
        Self {
            directory: None,
            host: "127.0.0.1".to_string(),
            port: 4221,
            buffer_size: 1024,
            max_body_bytes: 1024 * 1024,
            read_timeout_ms: 0,
            max_connections: 0,
            log_level: "info".to_string(),
        }
    }
}
