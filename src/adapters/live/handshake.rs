//! Live login handshake over a loopback HTTP listener.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use crate::ports::{LoginHandshake, PortError};

const READ_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_BODY_LEN: usize = 64 * 1024;

/// Accepts the credential message the sign-in page posts to `127.0.0.1`.
pub struct LiveLoginHandshake;

struct Request {
    method: String,
    body: String,
}

fn read_request(stream: &TcpStream) -> Result<Request, PortError> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let method = request_line.split_whitespace().next().unwrap_or_default().to_ascii_uppercase();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse()?;
            }
        }
    }
    if content_length > MAX_BODY_LEN {
        return Err(format!("credential message too large ({content_length} bytes)").into());
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;
    Ok(Request { method, body: String::from_utf8(body)? })
}

fn respond(mut stream: &TcpStream, status: &str) -> std::io::Result<()> {
    write!(
        stream,
        "HTTP/1.1 {status}\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Methods: POST, OPTIONS\r\n\
         Access-Control-Allow-Headers: Content-Type\r\n\
         Content-Length: 0\r\n\
         Connection: close\r\n\r\n"
    )?;
    stream.flush()
}

impl LoginHandshake for LiveLoginHandshake {
    fn receive_credentials(
        &self,
        on_listening: &mut dyn FnMut(u16) -> Result<(), String>,
    ) -> Result<String, PortError> {
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        on_listening(listener.local_addr()?.port())?;

        for stream in listener.incoming() {
            let stream = stream?;
            stream.set_read_timeout(Some(READ_TIMEOUT))?;
            let request = read_request(&stream)?;

            if request.method == "OPTIONS" {
                respond(&stream, "204 No Content")?;
                continue;
            }
            respond(&stream, "200 OK")?;
            return Ok(request.body);
        }
        Err("login listener closed before credentials arrived".into())
    }
}
