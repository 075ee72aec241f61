//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que usa el servidor,
//! sin librerías de alto nivel. Incluye:
//!
//! - Codec de headers (parseo y serialización)
//! - Codec de body (negociación de `Accept-Encoding` y gzip)
//! - Parsing de requests
//! - Construcción de responses y status codes
//!
//! ## Alcance
//!
//! - Una sola petición por conexión (`Connection: close`)
//! - Sin chunked transfer encoding, sin pipelining, sin TLS
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod encoding; // Negociación y compresión del body
pub mod headers;  // Codec de headers
pub mod request;  // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status;   // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use encoding::ContentEncoding;
pub use headers::HeaderMap;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
