//! HTTP(S) push-gateway transport.
//!
//! Implements [`NotificationTransport`] with a blocking `ureq` agent.  Each
//! call is one POST bounded by the agent timeout; failures are categorised
//! into [`DeliveryError`] variants and never retried.

use std::time::Duration;

use crate::app::ports::NotificationTransport;
use crate::error::DeliveryError;

pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// `timeout` bounds the whole request, from connect to last response byte.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("lumen/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl NotificationTransport for HttpTransport {
    fn post_json(&mut self, endpoint: &str, body: &str) -> Result<u16, DeliveryError> {
        let response = self
            .agent
            .post(endpoint)
            .set("Content-Type", "application/json")
            .send_string(body);

        match response {
            Ok(resp) => Ok(resp.status()),
            Err(ureq::Error::Status(code, _)) => Err(DeliveryError::Status(code)),
            Err(ureq::Error::Transport(t)) => Err(categorise(&t)),
        }
    }
}

fn categorise(transport: &ureq::Transport) -> DeliveryError {
    if is_timeout(transport) {
        DeliveryError::Timeout
    } else {
        DeliveryError::Connection
    }
}

/// Walk the source chain looking for an I/O timeout.
fn is_timeout(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ) {
                return true;
            }
        }
        current = e.source();
    }
    false
}
