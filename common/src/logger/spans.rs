use tracing::Span;

use super::TraceId;

/// Root span for a multi-step flow (login, logout, bootstrap). The trace id
/// ties together everything the flow touches.
pub fn root_span(flow: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!("flow", name = %flow, trace_id = %trace_id.as_str())
}

/// Child span for one step inside a flow; inherits the trace id from the
/// enclosing root span.
pub fn child_span(step: &'static str) -> Span {
    tracing::info_span!("step", name = %step)
}
