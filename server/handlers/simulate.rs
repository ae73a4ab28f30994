use tiny_http::Request;

use tensor_forge::engine::{Engine, SimulateRequest};

use crate::handlers::{parse_json, read_body};
use crate::routes::{error_response, json_response, JsonResponse};

/// `POST /api/simulate`. Unknown levels still answer 200.
pub fn handle(request: &mut Request, engine: &Engine) -> JsonResponse {
    match read_body(request) {
        Ok(body) => respond(engine, &body),
        Err(e) => error_response(&e),
    }
}

pub fn respond(engine: &Engine, body: &[u8]) -> JsonResponse {
    let body: SimulateRequest = match parse_json(body) {
        Ok(body) => body,
        Err(e) => return error_response(&e),
    };
    match engine.simulate(&body) {
        Ok(result) => json_response(200, &result),
        Err(e) => error_response(&e),
    }
}
