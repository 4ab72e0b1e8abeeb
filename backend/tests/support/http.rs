//! HTTP helpers recording responses into the shared world.

use actix_web::http::header;
use awc::{Client, ClientResponse};
use contact_form::domain::TRACE_ID_HEADER;
use serde_json::Value;

use crate::harness::{SharedWorld, with_world_async};

pub(crate) enum Body {
    None,
    Json(Value),
    Form(Vec<(&'static str, &'static str)>),
}

struct CapturedResponse {
    status: u16,
    content_type: Option<String>,
    trace_id: Option<String>,
    body: Option<Value>,
    text: String,
}

fn header_value<S>(response: &ClientResponse<S>, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Send a request and store status, headers, raw body and JSON body (when
/// there is one).
pub(crate) fn perform_request(world: &SharedWorld, path: &str, body: Body) {
    let path = path.to_owned();
    let captured = with_world_async(world, |base_url| async move {
        let client = Client::default();
        let url = format!("{base_url}{path}");
        let mut response = match body {
            Body::None => client.get(url).send().await.expect("request"),
            Body::Json(payload) => client
                .post(url)
                .send_json(&payload)
                .await
                .expect("json request"),
            Body::Form(fields) => client
                .post(url)
                .send_form(&fields)
                .await
                .expect("form request"),
        };
        let status = response.status().as_u16();
        let content_type = header_value(&response, header::CONTENT_TYPE.as_str());
        let trace_id = header_value(&response, TRACE_ID_HEADER);
        let bytes = response.body().await.expect("body");
        CapturedResponse {
            status,
            content_type,
            trace_id,
            body: serde_json::from_slice(&bytes).ok(),
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(captured.status);
    ctx.last_content_type = captured.content_type;
    ctx.last_trace_id = captured.trace_id;
    ctx.last_body = captured.body;
    ctx.last_text = captured.text;
}
