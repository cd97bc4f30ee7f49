//! Sending side of the preview protocol
//!
//! Delivery is best-effort and fire-and-forget: posting never blocks, never
//! suspends, and reports nothing back. A missed message is repaired by the
//! next snapshot.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use chatlab_model::WidgetConfig;
use tokio::sync::mpsc;

use crate::message::PreviewMessage;

/// Origin a posted message may be delivered to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TargetOrigin {
    /// Unrestricted (`*`)
    #[default]
    Any,
    /// Only a surface running at this exact origin
    Origin(String),
}

impl TargetOrigin {
    /// Check if a surface at `receiver_origin` may receive the message
    #[inline]
    #[must_use]
    pub fn permits(&self, receiver_origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Origin(origin) => origin == receiver_origin,
        }
    }
}

impl Display for TargetOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Origin(origin) => f.write_str(origin),
        }
    }
}

/// A posted message together with its delivery target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Origin the message was addressed to
    pub target: TargetOrigin,
    /// Message as posted
    pub message: PreviewMessage,
}

/// Transport for preview messages
///
/// Implementations must not block and must swallow delivery failures.
pub trait PreviewSink: Send + Sync {
    /// Post a message toward the preview surface
    fn post(&self, message: &PreviewMessage, target: &TargetOrigin);
}

/// Sink that discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PreviewSink for NullSink {
    fn post(&self, _message: &PreviewMessage, _target: &TargetOrigin) {}
}

/// Sink backed by an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<Delivery>,
}

impl ChannelSink {
    /// Create sink and the receiver the preview side reads from
    #[must_use]
    pub fn open() -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl PreviewSink for ChannelSink {
    fn post(&self, message: &PreviewMessage, target: &TargetOrigin) {
        let delivery = Delivery {
            target: target.clone(),
            message: message.clone(),
        };
        if self.sender.send(delivery).is_err() {
            tracing::trace!("preview receiver gone, message dropped");
        }
    }
}

/// Editor-side handle that publishes configuration snapshots
#[derive(Clone)]
pub struct PreviewChannel {
    sink: Arc<dyn PreviewSink>,
    target: TargetOrigin,
}

impl PreviewChannel {
    /// Create channel with an unrestricted target
    #[inline]
    #[must_use]
    pub fn new(sink: Arc<dyn PreviewSink>) -> Self {
        Self {
            sink,
            target: TargetOrigin::Any,
        }
    }

    /// Channel that publishes nowhere
    #[inline]
    #[must_use]
    pub fn disconnected() -> Self {
        Self::new(Arc::new(NullSink))
    }

    /// Scope delivery to one origin
    #[inline]
    #[must_use]
    pub fn with_target_origin(mut self, origin: impl Into<String>) -> Self {
        self.target = TargetOrigin::Origin(origin.into());
        self
    }

    /// Current delivery target
    #[inline]
    #[must_use]
    pub fn target(&self) -> &TargetOrigin {
        &self.target
    }

    /// Publish a full snapshot of `config`
    pub fn publish(&self, config: &WidgetConfig) {
        self.send(&PreviewMessage::config_update(config));
    }

    /// Post an arbitrary message
    pub fn send(&self, message: &PreviewMessage) {
        tracing::debug!(target_origin = %self.target, "posting preview message");
        self.sink.post(message, &self.target);
    }
}

impl fmt::Debug for PreviewChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewChannel")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
