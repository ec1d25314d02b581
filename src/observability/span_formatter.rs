//! OTLP JSON encoding of finished spans.
//!
//! Each exported batch becomes one self-contained `resourceSpans` document, so
//! the trace file is newline-delimited OTLP JSON that collectors can replay.

use opentelemetry::trace::{Link, SpanId, SpanKind, Status};
use opentelemetry::{Array, KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::SystemTime;

/// Formats batches of spans into complete OTLP JSON documents.
pub struct SpanFormatter {
    resource: Resource,
    scope_name: String,
}

impl SpanFormatter {
    /// Creates a formatter that stamps every batch with `resource` and reports
    /// spans under the instrumentation scope `scope_name`.
    pub fn new(resource: Resource, scope_name: impl Into<String>) -> Self {
        Self {
            resource,
            scope_name: scope_name.into(),
        }
    }

    /// Formats a batch of spans as one OTLP JSON document.
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(key, value)| attribute_json(key.as_str(), value))
            .collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource },
                "scopeSpans": [{
                    "scope": { "name": self.scope_name },
                    "spans": batch.iter().map(span_json).collect::<Vec<_>>(),
                }],
            }],
        })
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope_name", &self.scope_name)
            .finish_non_exhaustive()
    }
}

fn span_json(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };
    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "timeUnixNano": unix_nanos(event.timestamp),
                "name": event.name,
                "attributes": attributes_json(&event.attributes),
            })
        })
        .collect();

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes_json(&span.attributes),
        "events": events,
        "links": span.links.iter().map(link_json).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn link_json(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes_json(&link.attributes),
    })
}

/// OTLP `SpanKind` numbering; 0 (unspecified) is never produced.
const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes_json(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| attribute_json(kv.key.as_str(), &kv.value))
        .collect()
}

fn attribute_json(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": any_value(value) })
}

/// OTLP `AnyValue`. 64-bit integers are encoded as strings.
fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(array) => json!({ "arrayValue": { "values": array_values(array) } }),
    }
}

#[allow(unreachable_patterns)]
fn array_values(array: &Array) -> Vec<JsonValue> {
    match array {
        Array::Bool(items) => items.iter().map(|b| json!({ "boolValue": b })).collect(),
        Array::I64(items) => items.iter().map(|i| json!({ "intValue": i.to_string() })).collect(),
        Array::F64(items) => items.iter().map(|f| json!({ "doubleValue": f })).collect(),
        Array::String(items) => items.iter().map(|s| json!({ "stringValue": s.as_str() })).collect(),
        other => vec![json!({ "stringValue": other.to_string() })],
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}
