//! # Handlers Básicos
//!
//! - `/`: 200 sin body
//! - fallback: 404 sin body
//! - `/echo/*`: devuelve el segmento, comprimido si el cliente acepta gzip
//! - `/user-agent`: devuelve el header `User-Agent`

use crate::config::Config;
use crate::http::encoding::{encode_body, negotiate_encoding, ContentEncoding};
use crate::http::{Request, Response, StatusCode};
use crate::router::RouteMatch;
use tracing::error;

/// Handler para `/`
pub fn root_handler(_req: &Request, _route: &RouteMatch<'_>, _config: &Config) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler cuando ninguna ruta coincide
pub fn not_found_handler(_req: &Request, _route: &RouteMatch<'_>, _config: &Config) -> Response {
    Response::new(StatusCode::NotFound)
}

/// Handler para `/echo/{texto}`
///
/// El body es el segmento después de `/echo/`, sin decodificar. Si el
/// `Accept-Encoding` del cliente incluye un encoding soportado, el body
/// sale comprimido y se agrega `Content-Encoding`.
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: text/plain
/// Content-Length: 6
///
/// abc123
/// ```
pub fn echo_handler(req: &Request, route: &RouteMatch<'_>, _config: &Config) -> Response {
    let message = route.segment();
    let encoding = negotiate_encoding(req.header("Accept-Encoding"), ContentEncoding::SUPPORTED);

    let body = match encode_body(message, encoding) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "failed to encode echo body");
            return Response::new(StatusCode::InternalServerError);
        }
    };

    let mut response = Response::new(StatusCode::Ok)
        .with_header("Content-Type", "text/plain")
        .with_body_bytes(body);

    if let Some(encoding) = encoding {
        response.add_header("Content-Encoding", encoding.as_str());
    }

    response
}

/// Handler para `/user-agent`
///
/// 400 si el header falta o viene vacío.
pub fn user_agent_handler(req: &Request, _route: &RouteMatch<'_>, _config: &Config) -> Response {
    match req.header("User-Agent").filter(|ua| !ua.is_empty()) {
        Some(user_agent) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body(user_agent),
        None => Response::new(StatusCode::BadRequest),
    }
}
