//! Root span of every HTTP request, with its duration.

use std::time::{Duration, Instant};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::HttpMessage;
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

/// Requests taking longer than this are logged as warnings.
const SLOW_REQUEST: Duration = Duration::from_secs(2);

/// Default request span, extended with a `duration_ms` field.
pub struct UnidashRootSpanBuilder;

/// When the request was received, kept in the request extensions.
#[derive(Clone, Copy)]
struct Received(Instant);

/// Whether a request that took `elapsed` should be reported as slow.
fn is_slow(elapsed: Duration) -> bool {
    elapsed > SLOW_REQUEST
}

impl RootSpanBuilder for UnidashRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        request.extensions_mut().insert(Received(Instant::now()));
        tracing_actix_web::root_span!(request, duration_ms = tracing::field::Empty)
    }

    fn on_request_end<B: MessageBody>(
        span: Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        if let Ok(response) = outcome {
            let received = response.request().extensions().get::<Received>().copied();
            if let Some(Received(at)) = received {
                let elapsed = at.elapsed();
                span.record("duration_ms", elapsed.as_millis());
                if is_slow(elapsed) {
                    tracing::warn!(
                        parent: &span,
                        path = response.request().path(),
                        status = response.status().as_u16(),
                        duration_ms = elapsed.as_millis(),
                        "Slow request"
                    );
                }
            }
        }
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}
