//! Response sinks the dispatcher writes to.

use crate::config::Headers;

/// Destination for a dispatched response.
///
/// The dispatcher calls [`write_header`](ResponseSink::write_header) once and
/// then [`end`](ResponseSink::end) once per request.
pub trait ResponseSink {
    fn write_header(&mut self, status: u16, headers: &Headers);

    fn end(&mut self, body: &str);
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn write_header(&mut self, status: u16, headers: &Headers) {
        (**self).write_header(status, headers);
    }

    fn end(&mut self, body: &str) {
        (**self).end(body);
    }
}

/// A call observed by [`RecordedResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    WriteHeader { status: u16, headers: Headers },
    End { body: String },
}

/// Sink that records every call, for assertions in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordedResponse {
    calls: Vec<SinkCall>,
}

impl RecordedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in the order they were made.
    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Status from the most recent `write_header`.
    pub fn status(&self) -> Option<u16> {
        self.calls.iter().rev().find_map(|call| match call {
            SinkCall::WriteHeader { status, .. } => Some(*status),
            SinkCall::End { .. } => None,
        })
    }

    /// Headers from the most recent `write_header`.
    pub fn headers(&self) -> Option<&Headers> {
        self.calls.iter().rev().find_map(|call| match call {
            SinkCall::WriteHeader { headers, .. } => Some(headers),
            SinkCall::End { .. } => None,
        })
    }

    /// Body from the most recent `end`.
    pub fn body(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            SinkCall::End { body } => Some(body.as_str()),
            SinkCall::WriteHeader { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ResponseSink for RecordedResponse {
    fn write_header(&mut self, status: u16, headers: &Headers) {
        self.calls.push(SinkCall::WriteHeader {
            status,
            headers: headers.clone(),
        });
    }

    fn end(&mut self, body: &str) {
        self.calls.push(SinkCall::End {
            body: body.to_string(),
        });
    }
}
