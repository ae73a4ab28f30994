pub mod hint;
pub mod levels;
pub mod simulate;
pub mod train;

use serde::de::DeserializeOwned;
use tiny_http::Request;

use tensor_forge::error::Result;

/// Reads the whole request body as raw bytes.
pub fn read_body(request: &mut Request) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    request.as_reader().read_to_end(&mut body)?;
    Ok(body)
}

/// Decodes a body as JSON. Bytes that are not UTF-8 fail here as a JSON
/// error, not an I/O one.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}
