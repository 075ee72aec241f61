//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Accept loop en el thread principal; cada conexión aceptada se procesa
//! en su propio thread, que termina cuando la conexión se cierra.
//!
//! La tabla de rutas y la configuración se construyen una vez y se
//! comparten de solo lectura (`Arc`) con todos los threads.

use super::connection;
use super::limiter::ConnectionLimiter;
use crate::config::Config;
use crate::error::ServerError;
use crate::http::{Response, StatusCode};
use crate::router::Router;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, field, info, info_span, warn};

/// Backlog de conexiones pendientes del listener
const LISTEN_BACKLOG: i32 = 128;

/// Tiempo máximo que se dedica a rechazar una conexión con 503
const REJECT_TIMEOUT: Duration = Duration::from_millis(100);

/// Servidor HTTP/1.1 concurrente
#[derive(Debug)]
pub struct Server {
    config: Arc<Config>,
    router: Arc<Router>,
    limiter: ConnectionLimiter,
    listener: TcpListener,
}

impl Server {
    /// Valida la configuración y abre el listener
    ///
    /// Con `port = 0` el sistema elige un puerto libre (ver `local_addr`).
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        config.validate()?;

        let address = config.address();
        let listener = create_listener(&address)?;
        info!(address = %listener.local_addr()?, "servidor escuchando");

        Ok(Self {
            limiter: ConnectionLimiter::new(config.max_connections),
            router: Arc::new(Router::standard()),
            config: Arc::new(config),
            listener,
        })
    }

    /// Dirección real del listener
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop: bloquea el thread actual indefinidamente
    pub fn run(self) -> Result<(), ServerError> {
        info!("modo concurrente: un thread por conexión");

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream),
                Err(e) => warn!(error = %e, "error al aceptar conexión"),
            }
        }

        Ok(())
    }

    /// Entrega la conexión a un thread nuevo (o la rechaza con 503)
    fn dispatch(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let Some(permit) = self.limiter.try_acquire() else {
            warn!(%peer, active = self.limiter.active(), "límite de conexiones alcanzado");
            let spawned = thread::Builder::new()
                .name("reject".to_string())
                .spawn(move || reject(stream));
            if let Err(e) = spawned {
                error!(error = %e, "no se pudo crear el thread de rechazo");
            }
            return;
        };

        debug!(%peer, "nueva conexión");

        let router = Arc::clone(&self.router);
        let config = Arc::clone(&self.config);

        let spawned = thread::Builder::new()
            .name("connection".to_string())
            .spawn(move || {
                let _permit = permit;
                let span = info_span!("connection", %peer, method = field::Empty, path = field::Empty);
                let _enter = span.enter();

                serve(stream, &router, &config);
            });

        if let Err(e) = spawned {
            error!(error = %e, "no se pudo crear el thread de la conexión");
        }
    }
}

/// Cuerpo del thread de conexión; el socket se cierra al hacer drop
fn serve(mut stream: TcpStream, router: &Router, config: &Config) {
    if let Some(timeout) = config.read_timeout() {
        if let Err(e) = stream.set_read_timeout(Some(timeout)) {
            warn!(error = %e, "no se pudo configurar el timeout de lectura");
        }
    }

    connection::handle_connection(&mut stream, router, config);
}

/// Responde 503 desde un thread corto, fuera del accept loop
///
/// Se consume lo que el cliente ya envió para que el cierre no sea un
/// RST que descarte la respuesta.
fn reject(mut stream: TcpStream) {
    if let Err(e) = stream.set_read_timeout(Some(REJECT_TIMEOUT)) {
        debug!(error = %e, "no se pudo configurar el timeout de lectura del 503");
    }
    if let Err(e) = stream.set_write_timeout(Some(REJECT_TIMEOUT)) {
        debug!(error = %e, "no se pudo configurar el timeout de escritura del 503");
    }

    let mut discard = [0u8; 1024];
    let _ = stream.read(&mut discard);

    let response = Response::new(StatusCode::ServiceUnavailable).with_header("Connection", "close");
    if let Err(e) = stream.write_all(&response.to_bytes()) {
        debug!(error = %e, "no se pudo enviar el 503");
    }
}

/// Crea el listener con `SO_REUSEADDR` para poder re-bindear al reiniciar
fn create_listener(address: &str) -> Result<TcpListener, ServerError> {
    let addr = address
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| ServerError::Address(address.to_string()))?;

    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    Ok(socket.into())
}
