use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};

pub mod api;
pub mod routes;

/// Hard cap on one request, headers and body together.
const MAX_REQUEST_BYTES: usize = 1 << 20;

pub fn run_server(bind_addr: &str) -> io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    println!("dryfire server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream) -> io::Result<()> {
    let Some(request) = read_request(stream)? else {
        return Ok(());
    };
    let response =
        routes::route_request(&request.method, &request.path, &request.body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()
}

struct RawRequest {
    method: String,
    path: String,
    body: String,
}

/// Read one HTTP request: the header block up to its blank-line terminator,
/// then as many body bytes as Content-Length announces. The JSON bodies the
/// simulate and compare endpoints receive can arrive split across reads and
/// are reassembled here; a request without Content-Length gets an empty body.
fn read_request<R: Read>(reader: &mut R) -> io::Result<Option<RawRequest>> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];

    let body_start = loop {
        if let Some(start) = header_terminator(&buffer) {
            break start;
        }
        if buffer.len() > MAX_REQUEST_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "request exceeds size limit",
            ));
        }
        let bytes_read = reader.read(&mut chunk)?;
        if bytes_read == 0 {
            if buffer.is_empty() {
                return Ok(None);
            }
            // Peer closed without a terminator: treat everything as headers.
            break buffer.len();
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);
    };

    let head = String::from_utf8_lossy(&buffer[..body_start]).into_owned();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0)
        .min(MAX_REQUEST_BYTES);

    while buffer.len() - body_start < content_length {
        let bytes_read = reader.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);
    }

    let body_end = (body_start + content_length).min(buffer.len());
    let body = String::from_utf8_lossy(&buffer[body_start..body_end]).into_owned();
    Ok(Some(RawRequest { method, path, body }))
}

/// Index of the first body byte once the header terminator has arrived.
fn header_terminator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
        .or_else(|| {
            buffer
                .windows(2)
                .position(|window| window == b"\n\n")
                .map(|pos| pos + 2)
        })
}
