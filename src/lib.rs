//! Mock Dispatcher
//!
//! An in-process HTTP mock-response dispatcher for testing HTTP clients
//! without a real server. Requests are checked against an ordered list of
//! registered mocks; the first match answers, otherwise a default reply
//! (404 "Not Found") is sent.
//!
//! # Features
//!
//! - **Opaque Matchers**: Any `Fn(&R) -> bool` decides whether a mock applies
//! - **Recency Precedence**: The most recently registered mock is checked first
//! - **Match Limits**: Limit how many times a mock can be matched
//! - **Response Defaults**: Status 200, JSON content type, and JSON bodies
//! - **Configurable Default Reply**: Override status, headers, or body
//!
//! # Example
//!
//! ```
//! use mock_dispatcher::{MockDispatcher, MockEntry, MockResponse, RecordedResponse, ResponseBody};
//!
//! let mut dispatcher = MockDispatcher::<str>::new();
//! dispatcher.register(
//!     MockEntry::new(
//!         |path: &str| path == "/hello",
//!         MockResponse::new()
//!             .with_body(ResponseBody::from_value(serde_json::json!({"message": "hi"}))),
//!     )
//!     .times(1),
//! );
//!
//! let mut sink = RecordedResponse::new();
//! dispatcher.dispatch("/hello", &mut sink);
//! assert_eq!(sink.body(), Some(r#"{"message":"hi"}"#));
//!
//! dispatcher.dispatch("/hello", &mut sink);
//! assert_eq!(sink.status(), Some(404));
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod matcher;
pub mod sink;

pub use config::{
    DefaultReply, DefaultReplyOverride, DispatcherConfig, DispatcherSettings, Headers,
    MockResponse, ResponseBody,
};
pub use dispatcher::{normalize, Dispatched, MockDispatcher, NormalizedResponse};
pub use error::MockError;
pub use matcher::{Matcher, MockEntry, Registry};
pub use sink::{RecordedResponse, ResponseSink, SinkCall};
