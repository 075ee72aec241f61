//! # Handlers de Archivos
//!
//! `/files/{nombre}` lee (GET) o escribe (POST) archivos directamente
//! dentro del directorio configurado con `--directory`.
//!
//! ## Seguridad
//!
//! El nombre sale del path sin decodificar. Antes de tocar el filesystem
//! se rechazan nombres vacíos, `.`/`..`, nombres con `..`, separadores
//! (`/`, `\`) o bytes NUL: no hay subdirectorios ni path traversal.
//!
//! Dos POST concurrentes al mismo nombre compiten sin locking; gana el
//! último que escribe.

use crate::config::Config;
use crate::http::{Method, Request, Response, StatusCode};
use crate::router::RouteMatch;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, error, warn};

/// Handler para `/files/*`
///
/// - `GET`: 200 con los bytes del archivo, 404 si no existe
/// - `POST`: escribe el body, 201; 400 si el body falta o está vacío
/// - otros métodos: 405
pub fn files_handler(req: &Request, route: &RouteMatch<'_>, config: &Config) -> Response {
    let name = route.segment();

    if !is_valid_file_name(name) {
        debug!(name, "rejected file name");
        return Response::new(StatusCode::BadRequest);
    }

    let Some(directory) = config.directory.as_deref() else {
        warn!("no serve directory configured, /files is unavailable");
        return Response::new(StatusCode::InternalServerError);
    };

    let filepath = directory.join(name);

    match req.method() {
        Method::GET => read_file(&filepath),
        Method::POST => write_file(&filepath, req.body()),
        _ => Response::new(StatusCode::MethodNotAllowed).with_header("Allow", "GET, POST"),
    }
}

/// Valida que el nombre apunte a un archivo directo del directorio
fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

fn read_file(filepath: &Path) -> Response {
    match load(filepath) {
        Ok(Some(content)) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body_bytes(content),
        Ok(None) => Response::new(StatusCode::NotFound),
        Err(e) => {
            error!(path = %filepath.display(), error = %e, "failed to read file");
            Response::new(StatusCode::InternalServerError)
        }
    }
}

/// Lee el archivo completo; `None` si no existe o no es un archivo regular
///
/// El `File` se cierra al salir del scope, también en los caminos de error.
fn load(filepath: &Path) -> io::Result<Option<Vec<u8>>> {
    let mut file = match File::open(filepath) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let metadata = file.metadata()?;
    if !metadata.is_file() {
        return Ok(None);
    }

    let mut content = Vec::with_capacity(metadata.len() as usize);
    file.read_to_end(&mut content)?;
    Ok(Some(content))
}

fn write_file(filepath: &Path, body: Option<&[u8]>) -> Response {
    let Some(body) = body.filter(|body| !body.is_empty()) else {
        return Response::new(StatusCode::BadRequest);
    };

    // fs::write abre, escribe todo y cierra (trunca si ya existía)
    match fs::write(filepath, body) {
        Ok(()) => Response::new(StatusCode::Created),
        Err(e) => {
            error!(path = %filepath.display(), error = %e, "failed to write file");
            Response::new(StatusCode::InternalServerError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Router;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> Config {
        Config {
            directory: Some(dir.path().to_path_buf()),
            ..Config::default()
        }
    }

    fn run(raw: &[u8], config: &Config) -> Response {
        let request = Request::parse(raw).unwrap();
        let router = Router::standard();
        let route = router.resolve(request.path());
        files_handler(&request, &route, config)
    }

    // ==================== NOMBRES ====================

    #[test]
    fn test_valid_file_names() {
        assert!(is_valid_file_name("note.txt"));
        assert!(is_valid_file_name("a.b.c"));
        assert!(is_valid_file_name("with space"));
    }

    #[test]
    fn test_invalid_file_names() {
        for name in ["", ".", "..", "../etc/passwd", "a/b", "a\\b", "x..y", "nul\0"] {
            assert!(!is_valid_file_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_traversal_is_rejected_before_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);

        let response = run(b"GET /files/../secret HTTP/1.1\r\n\r\n", &config);
        assert_eq!(response.status(), StatusCode::BadRequest);

        let response = run(b"POST /files/../escape HTTP/1.1\r\n\r\nboom", &config);
        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(!dir.path().parent().unwrap().join("escape").exists());
    }

    #[test]
    fn test_name_without_slash_does_not_alias_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("note.txt"), b"secret").unwrap();

        let response = run(b"GET /filesnote.txt HTTP/1.1\r\n\r\n", &config_for(&dir));

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(response.body().is_empty());
    }

    // ==================== GET ====================

    #[test]
    fn test_get_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), b"hello world").unwrap();

        let response = run(b"GET /files/hello.txt HTTP/1.1\r\n\r\n", &config_for(&dir));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"hello world");
        assert_eq!(response.headers().get("Content-Type"), Some("application/octet-stream"));
        assert_eq!(response.headers().get("Content-Length"), Some("11"));
    }

    #[test]
    fn test_get_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let response = run(b"GET /files/missing.txt HTTP/1.1\r\n\r\n", &config_for(&dir));

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_get_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let response = run(b"GET /files/sub HTTP/1.1\r\n\r\n", &config_for(&dir));
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    // ==================== POST ====================

    #[test]
    fn test_post_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let raw = b"POST /files/note.txt HTTP/1.1\r\nContent-Length: 8\r\n\r\nhi there";

        let response = run(raw, &config_for(&dir));

        assert_eq!(response.status(), StatusCode::Created);
        assert!(response.body().is_empty());
        assert_eq!(fs::read(dir.path().join("note.txt")).unwrap(), b"hi there");
    }

    #[test]
    fn test_post_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("note.txt"), b"a much longer old content").unwrap();

        let response = run(b"POST /files/note.txt HTTP/1.1\r\n\r\nnew", &config_for(&dir));

        assert_eq!(response.status(), StatusCode::Created);
        assert_eq!(fs::read(dir.path().join("note.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_post_empty_body() {
        let dir = tempfile::tempdir().unwrap();

        let response = run(b"POST /files/empty.txt HTTP/1.1\r\n\r\n", &config_for(&dir));
        assert_eq!(response.status(), StatusCode::BadRequest);

        // Sin separador no hay body
        let response = run(b"POST /files/empty.txt HTTP/1.1\r\n", &config_for(&dir));
        assert_eq!(response.status(), StatusCode::BadRequest);

        assert!(!dir.path().join("empty.txt").exists());
    }

    // ==================== OTROS ====================

    #[test]
    fn test_other_method_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let response = run(b"DELETE /files/note.txt HTTP/1.1\r\n\r\n", &config_for(&dir));

        assert_eq!(response.status(), StatusCode::MethodNotAllowed);
        assert_eq!(response.headers().get("Allow"), Some("GET, POST"));
    }

    #[test]
    fn test_no_directory_configured() {
        let response = run(b"GET /files/note.txt HTTP/1.1\r\n\r\n", &Config::default());
        assert_eq!(response.status(), StatusCode::InternalServerError);
    }
}
