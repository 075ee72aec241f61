//! # Driver de Conexión
//! src/server/connection.rs
//!
//! Atiende una conexión aceptada de principio a fin:
//!
//! ```text
//! Accepted → Read → Parsed → Routed → Responded → Closed
//! ```
//!
//! - **Read**: una lectura de `buffer_size` bytes. Si el head ya está
//!   completo y declara `Content-Length`, se sigue leyendo hasta tener el
//!   body entero (o hasta que el peer cierre). Sin `Content-Length`, lo que
//!   llegó en la primera lectura es todo el request.
//! - Lectura de 0 bytes o error de I/O: se cierra sin responder.
//! - Request malformado: 400.
//! - La conexión siempre se cierra después de una respuesta (sin keep-alive).

use crate::config::Config;
use crate::handlers;
use crate::http::request::{declared_content_length, find_header_end, HEADER_END};
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use std::io::{self, Read, Write};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn, Span};

/// Tamaño de cada lectura extra mientras se completa el body
const CHUNK_SIZE: usize = 4096;

/// Errores de lectura del request
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("peer closed the connection before sending data")]
    Closed,

    #[error("declared body of {declared} bytes exceeds the limit of {limit}")]
    BodyTooLarge { declared: usize, limit: usize },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Atiende un request sobre `stream` y escribe la respuesta
///
/// Nunca hace panic ni retorna error: todo fallo queda dentro de esta
/// conexión.
pub fn handle_connection<S: Read + Write>(stream: &mut S, router: &Router, config: &Config) {
    let start = Instant::now();

    let raw = match read_request(stream, config.buffer_size, config.max_body_bytes) {
        Ok(raw) => raw,
        Err(ReadError::BodyTooLarge { declared, limit }) => {
            debug!(declared, limit, "body demasiado grande");
            send(stream, Response::new(StatusCode::PayloadTooLarge), start);
            return;
        }
        Err(e) => {
            debug!(error = %e, "conexión cerrada sin respuesta");
            return;
        }
    };

    debug!(bytes = raw.len(), "request leído");

    let response = respond(&raw, router, config);
    send(stream, response, start);
}

/// Parsea, rutea y ejecuta el handler
pub fn respond(raw: &[u8], router: &Router, config: &Config) -> Response {
    match Request::parse(raw) {
        Ok(request) => {
            let span = Span::current();
            span.record("method", request.method().as_str());
            span.record("path", request.path());

            let route = router.resolve(request.path());
            debug!(handler = ?route.handler, suffix = route.suffix, "ruta resuelta");

            handlers::dispatch(&route, &request, config)
        }
        Err(e) => {
            debug!(error = %e, "request malformado");
            Response::new(StatusCode::BadRequest)
        }
    }
}

/// Lee el request completo según las reglas del módulo
pub fn read_request<R: Read>(
    reader: &mut R,
    buffer_size: usize,
    max_body_bytes: usize,
) -> Result<Vec<u8>, ReadError> {
    let mut buffer = vec![0u8; buffer_size];
    let bytes_read = reader.read(&mut buffer)?;

    if bytes_read == 0 {
        return Err(ReadError::Closed);
    }
    buffer.truncate(bytes_read);

    let Some(header_end) = find_header_end(&buffer) else {
        return Ok(buffer);
    };

    // Un Content-Length inválido lo reporta después el parser (400)
    let Ok(Some(declared)) = declared_content_length(&buffer[..header_end]) else {
        return Ok(buffer);
    };

    if declared > max_body_bytes {
        return Err(ReadError::BodyTooLarge {
            declared,
            limit: max_body_bytes,
        });
    }

    let too_large = ReadError::BodyTooLarge {
        declared,
        limit: max_body_bytes,
    };
    let expected = (header_end + HEADER_END.len())
        .checked_add(declared)
        .ok_or(too_large)?;
    let mut chunk = [0u8; CHUNK_SIZE];

    while buffer.len() < expected {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            // El peer cerró antes de tiempo: el body queda truncado
            break;
        }
        let take = n.min(expected - buffer.len());
        buffer.extend_from_slice(&chunk[..take]);
    }

    Ok(buffer)
}

fn send<S: Write>(stream: &mut S, mut response: Response, start: Instant) {
    response.add_header("Connection", "close");
    let status = response.status();

    let written = stream
        .write_all(&response.to_bytes())
        .and_then(|()| stream.flush());

    if let Err(e) = written {
        debug!(error = %e, "no se pudo escribir la respuesta");
        return;
    }

    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    if status.is_server_error() {
        warn!(status = status.as_u16(), latency_ms, "respuesta enviada");
    } else {
        info!(status = status.as_u16(), latency_ms, "respuesta enviada");
    }
}
