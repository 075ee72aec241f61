//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa la tabla de rutas que mapea paths HTTP a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router::resolve → RouteMatch → handlers::dispatch → Response
//! ```
//!
//! Un patrón es exacto (`/user-agent`) o un prefijo con comodín final
//! (`/files/*`, que acepta cualquier path que empiece con `/files`).
//!
//! ## Precedencia
//!
//! Primero se prueban los patrones exactos y después los comodines;
//! dentro de cada grupo gana el orden de registro. Si nada coincide se
//! usa el handler de fallback (404).
//!
//! La tabla se construye una vez al arrancar y se comparte de solo
//! lectura entre todas las conexiones.

/// Sufijo que marca un patrón comodín
const WILDCARD_SUFFIX: &str = "/*";

/// Identificador de handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerId {
    Root,
    Echo,
    UserAgent,
    Files,
    NotFound,
}

/// Patrón de ruta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Coincide solo si `path == pattern`
    Exact(String),

    /// Coincide si el path empieza con el prefijo (sin el `/*` final)
    Prefix(String),
}

impl RoutePattern {
    /// Interpreta `"/echo/*"` como `Prefix("/echo")` y cualquier otra cosa como exacto
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix(WILDCARD_SUFFIX) {
            Some(prefix) => RoutePattern::Prefix(prefix.to_string()),
            None => RoutePattern::Exact(pattern.to_string()),
        }
    }

    /// Si coincide, retorna el resto del path después del prefijo
    fn matches<'p>(&self, path: &'p str) -> Option<&'p str> {
        match self {
            RoutePattern::Exact(exact) => (path == exact).then_some(""),
            RoutePattern::Prefix(prefix) => path.strip_prefix(prefix.as_str()),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, RoutePattern::Prefix(_))
    }
}

/// Resultado de resolver un path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'p> {
    /// Handler elegido
    pub handler: HandlerId,

    /// Parte del path después del prefijo comodín, sin tocar
    /// (vacío en rutas exactas y en el fallback)
    pub suffix: &'p str,
}

impl<'p> RouteMatch<'p> {
    /// El sufijo sin su `/` inicial: `/echo/abc` → `abc`
    ///
    /// Un sufijo que no empieza con `/` (`/echoabc`) no es un segmento y
    /// retorna vacío.
    pub fn segment(&self) -> &'p str {
        self.suffix.strip_prefix('/').unwrap_or("")
    }
}

/// Tabla ordenada de (patrón, handler)
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(RoutePattern, HandlerId)>,

    /// Handler cuando ninguna ruta coincide
    fallback: HandlerId,
}

impl Router {
    /// Crea un router vacío con fallback 404
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: HandlerId::NotFound,
        }
    }

    /// Tabla de rutas del servidor
    ///
    /// - `/` (exacta)
    /// - `/echo/*`
    /// - `/user-agent` (exacta)
    /// - `/files/*`
    pub fn standard() -> Self {
        let mut router = Self::new();
        router.register("/", HandlerId::Root);
        router.register("/echo/*", HandlerId::Echo);
        router.register("/user-agent", HandlerId::UserAgent);
        router.register("/files/*", HandlerId::Files);
        router
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::router::{HandlerId, Router};
    ///
    /// let mut router = Router::new();
    /// router.register("/echo/*", HandlerId::Echo);
    ///
    /// let route = router.resolve("/echo/hola");
    /// assert_eq!(route.handler, HandlerId::Echo);
    /// assert_eq!(route.segment(), "hola");
    /// ```
    pub fn register(&mut self, pattern: &str, handler: HandlerId) {
        self.routes.push((RoutePattern::parse(pattern), handler));
    }

    /// Resuelve un path a su handler
    ///
    /// Función pura de (path, tabla).
    pub fn resolve<'p>(&self, path: &'p str) -> RouteMatch<'p> {
        let exact = self.routes.iter().filter(|(pattern, _)| !pattern.is_wildcard());
        let wildcard = self.routes.iter().filter(|(pattern, _)| pattern.is_wildcard());

        for (pattern, handler) in exact.chain(wildcard) {
            if let Some(suffix) = pattern.matches(path) {
                return RouteMatch {
                    handler: *handler,
                    suffix,
                };
            }
        }

        RouteMatch {
            handler: self.fallback,
            suffix: "",
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
