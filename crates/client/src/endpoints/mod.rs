//! REST endpoint implementations.

mod request;
pub mod tutorial;
pub mod url_encoding;

pub use request::send_request;
pub use tutorial::{
    STARTED_TRANSLATION_TUTORIAL_EVENT_PATH, STARTED_TUTORIAL_EVENT_PATH, event_path,
    record_tutorial_started,
};
