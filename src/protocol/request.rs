//! # Parsing de Comandos
//! src/protocol/request.rs
//!
//! Cada request es una línea ASCII terminada en `\n` (el `\r` previo es
//! opcional):
//!
//! ```text
//! echo hola mundo\r\n
//! ^^^^ ^^^^^^^^^^
//!  |       +-- argumentos (resto de la línea, sin espacios al borde)
//!  +---------- comando (primer token, sin distinguir mayúsculas)
//! ```

use thiserror::Error;

/// Largo máximo de una línea de request, sin contar el terminador
pub const MAX_LINE_LEN: usize = 1024;

/// Errores que pueden ocurrir durante el parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Línea vacía o con solo espacios
    #[error("empty command")]
    EmptyCommand,

    /// La línea supera `MAX_LINE_LEN`
    #[error("line too long ({0} bytes, max {max})", max = MAX_LINE_LEN)]
    LineTooLong(usize),

    /// La línea no es UTF-8 válido
    #[error("invalid encoding")]
    InvalidEncoding,
}

/// Un comando parseado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Nombre del comando en minúsculas (ej: "echo")
    command: String,

    /// Resto de la línea (ej: "hola mundo")
    args: String,
}

impl Request {
    /// Parsea una línea de request
    ///
    /// Acepta la línea con o sin su terminador `\r\n` / `\n`.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use cmd_server::protocol::Request;
    ///
    /// let request = Request::parse(b"ECHO  hola mundo \r\n").unwrap();
    /// assert_eq!(request.command(), "echo");
    /// assert_eq!(request.args(), "hola mundo");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let line = strip_terminator(buffer);

        if line.len() > MAX_LINE_LEN {
            return Err(ParseError::LineTooLong(line.len()));
        }

        let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
        let line = line.trim();

        if line.is_empty() {
            return Err(ParseError::EmptyCommand);
        }

        let (command, args) = match line.split_once(char::is_whitespace) {
            Some((command, args)) => (command, args.trim()),
            None => (line, ""),
        };

        Ok(Self {
            command: command.to_ascii_lowercase(),
            args: args.to_string(),
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &str {
        &self.args
    }
}

/// Quita `\n` o `\r\n` del final
fn strip_terminator(buffer: &[u8]) -> &[u8] {
    let buffer = buffer.strip_suffix(b"\n").unwrap_or(buffer);
    buffer.strip_suffix(b"\r").unwrap_or(buffer)
}
