//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/note.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 8\r\n
//! \r\n
//! hi there
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path HTTP/1.1` (la versión se descarta)
//! 2. **Headers**: ver [`super::headers`]
//! 3. **Empty Line**: `\r\n\r\n` separa headers del body
//! 4. **Body**: bytes crudos después del separador (opcional)
//!
//! El path nunca se normaliza: no hay percent-decoding ni se colapsan
//! barras finales.

use super::headers::{parse_headers, HeaderMap};
use std::fmt;
use thiserror::Error;

/// Separador entre el bloque de headers y el body
pub(crate) const HEADER_END: &[u8] = b"\r\n\r\n";

/// Métodos HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    /// Cualquier otro token; el servidor no rechaza métodos desconocidos
    Other(String),
}

impl Method {
    fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::Other(other) => other,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío (o solo espacios)
    #[error("Empty request")]
    EmptyRequest,

    /// La request line tiene tokens de más
    #[error("Invalid request line: {0}")]
    InvalidRequestLine(String),

    /// La request line no tiene método
    #[error("Missing method in request line")]
    MissingMethod,

    /// La request line no tiene path
    #[error("Missing path in request line")]
    MissingPath,

    /// Request line o headers no son UTF-8
    #[error("Request head is not valid UTF-8")]
    InvalidUtf8,

    /// Content-Length no numérico, o repetido con valores distintos
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),
}

/// Representa un request HTTP parseado
///
/// Inmutable una vez construido.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Target crudo de la request line (ej: "/echo/abc")
    path: String,

    /// Headers tal cual llegaron
    headers: HeaderMap,

    /// `None` si no había separador `\r\n\r\n`
    body: Option<Vec<u8>>,
}

impl Request {
    /// Parsea un request desde bytes
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Request line vacía o incompleta, head no UTF-8
    ///   o Content-Length inválido
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: curl\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some("curl"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let (head, body) = match find_header_end(buffer) {
            Some(end) => (&buffer[..end], Some(&buffer[end + HEADER_END.len()..])),
            None => (buffer, None),
        };

        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidUtf8)?;
        if head.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // 1. Request line
        let (request_line, header_block) = head.split_once("\r\n").unwrap_or((head, ""));
        let (method, path) = Self::parse_request_line(request_line)?;

        // 2. Headers
        let headers = parse_headers(header_block);

        // 3. Body (recortado al Content-Length declarado, si existe)
        let body = match body {
            Some(bytes) => {
                let limit = content_length(&headers)?.unwrap_or(bytes.len());
                Some(bytes[..limit.min(bytes.len())].to_vec())
            }
            None => None,
        };

        Ok(Request {
            method,
            path,
            headers,
            body,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`. La versión se ignora.
    fn parse_request_line(line: &str) -> Result<(Method, String), ParseError> {
        let mut parts = line.split_whitespace();

        let method = parts.next().ok_or(ParseError::MissingMethod)?;
        let path = parts.next().ok_or(ParseError::MissingPath)?;

        // Método, target y a lo sumo la versión
        if parts.nth(1).is_some() {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        Ok((Method::parse(method), path.to_string()))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Obtiene un header específico (nombre exacto)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Obtiene el body del request
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Posición donde empieza `\r\n\r\n`, si ya llegó
pub fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_END.len())
        .position(|window| window == HEADER_END)
}

/// Content-Length declarado en un head ya completo
///
/// Lo usa la conexión para saber cuántos bytes de body faltan por leer
/// antes de parsear el request entero.
pub fn declared_content_length(head: &[u8]) -> Result<Option<usize>, ParseError> {
    let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidUtf8)?;
    let header_block = head.split_once("\r\n").map_or("", |(_, rest)| rest);
    content_length(&parse_headers(header_block))
}

/// Content-Length de los headers
///
/// Puede repetirse (con cualquier capitalización) solo si todas las
/// copias declaran el mismo valor.
fn content_length(headers: &HeaderMap) -> Result<Option<usize>, ParseError> {
    let mut declared = None;

    for (name, value) in headers.iter() {
        if !name.eq_ignore_ascii_case("Content-Length") {
            continue;
        }

        let length = value
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength(value.to_string()))?;

        match declared {
            Some(previous) if previous != length => {
                return Err(ParseError::InvalidContentLength(value.to_string()));
            }
            _ => declared = Some(length),
        }
    }

    Ok(declared)
}
