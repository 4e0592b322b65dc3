//! Push events - the closed set of operations a client or backend can request

mod push_event;

pub use push_event::{EventKind, NoticeCode, PushEvent, TopicNotice};
