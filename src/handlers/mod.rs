//! # Handlers del Servidor
//!
//! Lógica de cada ruta. Cada handler es una función pura de
//! (request, ruta resuelta, configuración) que retorna una Response;
//! ninguno guarda estado entre invocaciones.
//!
//! - **basic**: `/`, 404, `/echo/*`, `/user-agent`
//! - **files**: `GET` y `POST` sobre `/files/*`

pub mod basic;
pub mod files;

use crate::config::Config;
use crate::http::{Request, Response};
use crate::router::{HandlerId, RouteMatch};

/// Tipo de función handler
pub type Handler = fn(&Request, &RouteMatch<'_>, &Config) -> Response;

/// Función asociada a cada identificador de handler
pub fn handler_for(id: HandlerId) -> Handler {
    match id {
        HandlerId::Root => basic::root_handler,
        HandlerId::Echo => basic::echo_handler,
        HandlerId::UserAgent => basic::user_agent_handler,
        HandlerId::Files => files::files_handler,
        HandlerId::NotFound => basic::not_found_handler,
    }
}

/// Ejecuta el handler de una ruta ya resuelta
pub fn dispatch(route: &RouteMatch<'_>, request: &Request, config: &Config) -> Response {
    handler_for(route.handler)(request, route, config)
}
