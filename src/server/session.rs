//! # Sesión por Conexión
//! src/server/session.rs
//!
//! Loop que ejecuta un worker mientras atiende una conexión:
//! leer una línea, despachar el comando, escribir la respuesta.
//! Termina cuando el cliente cierra la conexión o envía `quit`.

use crate::protocol::{Request, Response, MAX_LINE_LEN};
use crate::router::{Context, Router};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use tracing::debug;

/// Atiende una conexión hasta EOF o `quit`
///
/// Una línea inválida se responde con `ERR` y la conexión sigue abierta.
/// Los errores de I/O terminan la sesión y se retornan al caller.
pub fn serve(stream: TcpStream, router: &Router, ctx: &Context<'_>) -> io::Result<()> {
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    let mut line = Vec::with_capacity(128);

    loop {
        line.clear();
        if read_request_line(&mut reader, &mut line)? == 0 {
            debug!(conn = ctx.conn_id, "peer closed connection");
            return Ok(());
        }

        let response = match Request::parse(&line) {
            Ok(request) => {
                debug!(conn = ctx.conn_id, command = request.command(), "dispatching");
                router.dispatch(ctx, &request)
            }
            Err(e) => {
                debug!(conn = ctx.conn_id, error = %e, "invalid request line");
                Response::error(&e.to_string())
            }
        };

        writer.write_all(&response.to_bytes())?;
        writer.flush()?;

        if response.closes_connection() {
            return Ok(());
        }
    }
}

/// Lee una línea de a lo sumo `MAX_LINE_LEN` bytes más su terminador
///
/// Si la línea es más larga, deja en `line` el prefijo leído (que el parser
/// rechaza) y descarta el resto hasta el próximo `\n`.
fn read_request_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<usize> {
    let limit = (MAX_LINE_LEN + 2) as u64;
    let read = reader.by_ref().take(limit).read_until(b'\n', line)?;

    if read as u64 == limit && !line.ends_with(b"\n") {
        let mut rest = Vec::new();
        loop {
            rest.clear();
            let skipped = reader.by_ref().take(limit).read_until(b'\n', &mut rest)?;
            if skipped == 0 || rest.ends_with(b"\n") {
                break;
            }
        }
    }

    Ok(read)
}
