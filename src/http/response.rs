//! Response framing.
//!
//! # Responsibilities
//! - Frame a body as a complete HTTP/1.1 `200 OK` response
//!
//! # Design Decisions
//! - Content-Length is the exact byte length of the body
//! - Header lines end in bare newlines; the header block and body are
//!   separated by a blank line

/// Frame `body` as a complete `200 OK` response.
///
/// Pure function; the caller writes the result to the peer in one attempt.
pub fn build(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\nContent-Type: text/html\nContent-Length: {}\n\n{}",
        body.len(),
        body
    )
}
