//! # Errores del Servidor
//! src/error.rs
//!
//! Errores que pueden terminar el proceso: solo el arranque (configuración
//! y bind). Los errores de una conexión nunca salen de su thread.

use crate::config::ConfigError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("could not resolve listen address: {0}")]
    Address(String),
}
