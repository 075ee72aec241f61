//! # Construcción de Respuestas HTTP
//!
//! API para construir respuestas HTTP/1.1 y convertirlas a bytes para
//! enviarlas al cliente.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 6\r\n
//! \r\n
//! abc123
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use minihttp::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("abc123");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::headers::{serialize_headers, HeaderMap};
use super::StatusCode;

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción
    headers: HeaderMap,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name, value);
    }

    /// Establece el cuerpo desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo desde bytes (archivos, bodies comprimidos)
    ///
    /// El `Content-Length` se calcula sobre estos bytes, así que un body
    /// comprimido anuncia su tamaño comprimido.
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers
            .insert("Content-Length", self.body.len().to_string());
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - `Content-Length: 0` si nadie puso body
    /// - Línea vacía y body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = format!("HTTP/1.1 {}\r\n", self.status).into_bytes();

        result.extend_from_slice(&serialize_headers(&self.headers));
        if !self.headers.contains("Content-Length") {
            result.extend_from_slice(b"Content-Length: 0\r\n");
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_with_body() {
        let response = Response::new(StatusCode::Ok).with_body("abc123");

        assert_eq!(response.body(), b"abc123");
        assert_eq!(response.headers().get("Content-Length"), Some("6"));
    }

    #[test]
    fn test_content_length_counts_bytes_not_chars() {
        let response = Response::new(StatusCode::Ok).with_body("ñ");
        assert_eq!(response.headers().get("Content-Length"), Some("2"));
    }

    #[test]
    fn test_to_bytes_exact() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body("Test");

        assert_eq!(
            response.to_bytes(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 4\r\n\r\nTest"
        );
    }

    #[test]
    fn test_empty_body_response_gets_zero_length() {
        let response = Response::new(StatusCode::NotFound);
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert_eq!(text, "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn test_with_body_bytes() {
        let binary_data = vec![0x00, 0x01, 0x02, 0xFF];
        let response = Response::new(StatusCode::Ok).with_body_bytes(binary_data.clone());

        assert_eq!(response.body(), &binary_data[..]);
        assert_eq!(response.headers().get("Content-Length"), Some("4"));
    }
}
