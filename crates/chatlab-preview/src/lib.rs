//! chatlab Preview
//!
//! One-directional protocol that pushes complete configuration snapshots from
//! the editor to a live preview surface.
//!
//! # Wire format
//!
//! ```text
//! { "type": "CONFIG_UPDATE", "config": { "botName": ..., "bubbleRadius": ... } }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chatlab_model::WidgetConfig;
//! use chatlab_preview::{ChannelSink, PreviewChannel, PreviewSurface};
//!
//! let (sink, mut rx) = ChannelSink::open();
//! let channel = PreviewChannel::new(Arc::new(sink));
//! channel.publish(&WidgetConfig::default().with_bot_name("Nova"));
//!
//! let mut surface = PreviewSurface::new();
//! let delivery = rx.try_recv().unwrap();
//! surface.accept("https://dashboard.example", &delivery);
//! assert_eq!(surface.render_state().unwrap().bot_name, "Nova");
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod channel;
mod message;
mod surface;

pub use channel::{ChannelSink, Delivery, NullSink, PreviewChannel, PreviewSink, TargetOrigin};
pub use message::PreviewMessage;
pub use surface::{css_variable_name, PreviewSurface};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
