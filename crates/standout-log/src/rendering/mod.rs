//! Alignment and message-template rendering shared by the output renderers.

pub mod padding;

mod message;

pub use message::MessageTemplateRenderer;
