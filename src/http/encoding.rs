//! # Codec de Body
//! src/http/encoding.rs
//!
//! Negociación de `Content-Encoding` a partir del header `Accept-Encoding`
//! del cliente, y compresión del body con el encoding elegido.
//!
//! Por ahora el servidor solo soporta gzip (vía `flate2`).

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Encodings de contenido que el servidor sabe producir
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// gzip (RFC 1952)
    Gzip,
}

impl ContentEncoding {
    /// Conjunto soportado por defecto
    pub const SUPPORTED: &'static [ContentEncoding] = &[ContentEncoding::Gzip];

    /// Nombre del encoding tal como aparece en los headers
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }
}

/// Elige el encoding para la response
///
/// Recorre los tokens del header en el orden declarado por el cliente
/// (separados por coma, sin espacios alrededor) y retorna el primero que
/// esté en `supported`. Sin header o sin coincidencias retorna `None`.
///
/// # Ejemplo
/// ```
/// use minihttp::http::encoding::{negotiate_encoding, ContentEncoding};
///
/// let chosen = negotiate_encoding(Some("br, gzip"), ContentEncoding::SUPPORTED);
/// assert_eq!(chosen, Some(ContentEncoding::Gzip));
///
/// assert_eq!(negotiate_encoding(Some("br"), ContentEncoding::SUPPORTED), None);
/// ```
pub fn negotiate_encoding(
    accept_encoding: Option<&str>,
    supported: &[ContentEncoding],
) -> Option<ContentEncoding> {
    let accept_encoding = accept_encoding?;

    accept_encoding
        .split(',')
        .map(str::trim)
        .find_map(|token| supported.iter().copied().find(|enc| enc.as_str() == token))
}

/// Codifica el body
///
/// Con un encoding negociado comprime los bytes UTF-8 de `text`; sin
/// encoding retorna los bytes sin modificar. El Content-Length siempre
/// debe calcularse sobre el resultado, no sobre `text`.
pub fn encode_body(text: &str, encoding: Option<ContentEncoding>) -> io::Result<Vec<u8>> {
    match encoding {
        Some(ContentEncoding::Gzip) => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(text.as_bytes())?;
            encoder.finish()
        }
        None => Ok(text.as_bytes().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn gunzip(bytes: &[u8]) -> String {
        let mut decoder = GzDecoder::new(bytes);
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        out
    }

    // ==================== Negociación ====================

    #[test]
    fn test_negotiate_single_gzip() {
        let chosen = negotiate_encoding(Some("gzip"), ContentEncoding::SUPPORTED);
        assert_eq!(chosen, Some(ContentEncoding::Gzip));
    }

    #[test]
    fn test_negotiate_trims_tokens() {
        let chosen = negotiate_encoding(Some("invalid-1,   gzip  , invalid-2"), ContentEncoding::SUPPORTED);
        assert_eq!(chosen, Some(ContentEncoding::Gzip));
    }

    #[test]
    fn test_negotiate_no_match() {
        assert_eq!(negotiate_encoding(Some("br, deflate"), ContentEncoding::SUPPORTED), None);
    }

    #[test]
    fn test_negotiate_missing_header() {
        assert_eq!(negotiate_encoding(None, ContentEncoding::SUPPORTED), None);
    }

    #[test]
    fn test_negotiate_empty_supported_set() {
        assert_eq!(negotiate_encoding(Some("gzip"), &[]), None);
    }

    #[test]
    fn test_negotiate_token_must_match_exactly() {
        // "gzip;q=1.0" no es el token "gzip"
        assert_eq!(negotiate_encoding(Some("gzip;q=1.0"), ContentEncoding::SUPPORTED), None);
        assert_eq!(negotiate_encoding(Some("GZIP"), ContentEncoding::SUPPORTED), None);
    }

    // ==================== Encoding ====================

    #[test]
    fn test_encode_without_encoding_is_identity() {
        let body = encode_body("abc123", None).unwrap();
        assert_eq!(body, b"abc123");
    }

    #[test]
    fn test_encode_gzip_roundtrip() {
        let body = encode_body("hello", Some(ContentEncoding::Gzip)).unwrap();

        // Magic number de gzip
        assert_eq!(&body[..2], &[0x1f, 0x8b]);
        assert_eq!(gunzip(&body), "hello");
    }

    #[test]
    fn test_encode_gzip_unicode() {
        let body = encode_body("ñandú 🦀", Some(ContentEncoding::Gzip)).unwrap();
        assert_eq!(gunzip(&body), "ñandú 🦀");
    }
}
