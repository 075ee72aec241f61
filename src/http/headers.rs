//! # Codec de Headers
//! src/http/headers.rs
//!
//! Parsea el bloque de headers de un request y serializa los headers
//! de una response.
//!
//! ## Formato
//!
//! ```text
//! Host: localhost:4221\r\n
//! User-Agent: curl/8.4.0\r\n
//! ```
//!
//! Los nombres se guardan tal cual llegan (sensibles a mayúsculas) y,
//! si un header se repite, gana la última aparición.

/// Mapa de headers que conserva el orden de inserción
///
/// El orden importa al serializar una response: los headers salen
/// en el mismo orden en que el handler los agregó.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Crea un mapa vacío
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserta un header
    ///
    /// Si el nombre ya existe se reemplaza el valor en su posición
    /// original y se retorna el valor anterior.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Obtiene un header por nombre exacto
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Como `get`, pero ignorando mayúsculas (solo para framing, ej: Content-Length)
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itera en orden de inserción
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Parsea el bloque de headers (las líneas entre la request line y la línea vacía)
///
/// Cada línea se corta en la primera aparición de `": "`. Las líneas que
/// no tienen ese separador se ignoran en vez de producir un error.
///
/// # Ejemplo
/// ```
/// use minihttp::http::headers::parse_headers;
///
/// let headers = parse_headers("Host: localhost\r\nUser-Agent: curl/8.4.0\r\n");
/// assert_eq!(headers.get("User-Agent"), Some("curl/8.4.0"));
/// ```
pub fn parse_headers(block: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    // `lines()` corta en \n y descarta el \r final
    for line in block.lines() {
        if let Some((name, value)) = line.split_once(": ") {
            headers.insert(name, value);
        }
    }

    headers
}

/// Serializa los headers como `Name: Value\r\n` en orden de inserción
///
/// No hay escaping ni folding: los valores se escriben tal cual.
pub fn serialize_headers(headers: &HeaderMap) -> Vec<u8> {
    let mut out = Vec::new();

    for (name, value) in headers.iter() {
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_headers() {
        let headers = parse_headers("Host: localhost:4221\r\nAccept: */*\r\n");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Host"), Some("localhost:4221"));
        assert_eq!(headers.get("Accept"), Some("*/*"));
    }

    #[test]
    fn test_parse_splits_on_first_separator() {
        let headers = parse_headers("X-Note: a: b: c\r\n");
        assert_eq!(headers.get("X-Note"), Some("a: b: c"));
    }

    #[test]
    fn test_parse_skips_lines_without_separator() {
        let headers = parse_headers("garbage\r\nHost: x\r\nNoSpace:value\r\n");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Host"), Some("x"));
        assert!(!headers.contains("NoSpace"));
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let headers = parse_headers("X-Id: 1\r\nX-Id: 2\r\n");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Id"), Some("2"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let headers = parse_headers("user-agent: lower\r\n");

        assert_eq!(headers.get("User-Agent"), None);
        assert_eq!(headers.get("user-agent"), Some("lower"));
        assert_eq!(headers.get_ignore_case("User-Agent"), Some("lower"));
    }

    #[test]
    fn test_parse_empty_block() {
        assert!(parse_headers("").is_empty());
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "text/plain");
        headers.insert("Content-Length", "3");
        headers.insert("Content-Encoding", "gzip");

        let bytes = serialize_headers(&headers);
        assert_eq!(
            bytes,
            b"Content-Type: text/plain\r\nContent-Length: 3\r\nContent-Encoding: gzip\r\n"
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut headers = HeaderMap::new();
        headers.insert("A", "1");
        headers.insert("B", "2");

        assert_eq!(headers.insert("A", "3"), Some("1".to_string()));

        let order: Vec<_> = headers.iter().collect();
        assert_eq!(order, vec![("A", "3"), ("B", "2")]);
    }
}
