//! User-facing message surface.
//!
//! The synchronization core never renders anything itself; it hands failure
//! and confirmation texts to a collaborator, fire-and-forget.

use tracing::{error, info};

/// One-shot global message display consumed by the graph core.
pub trait MessageSurface {
    /// Show a persistent error message.
    fn show_error(&self, text: &str);

    /// Show a short-lived confirmation notice.
    fn show_transient_notice(&self, text: &str);
}

/// Message surface that routes to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMessages;

impl MessageSurface for TracingMessages {
    fn show_error(&self, text: &str) {
        error!("{text}");
    }

    fn show_transient_notice(&self, text: &str) {
        info!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_messages_are_fire_and_forget() {
        let surface = TracingMessages;
        surface.show_error("boom");
        surface.show_transient_notice("Saved.");
    }
}
