use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

pub mod dispatcher;
pub mod events;
pub mod factory;
pub mod logs;
pub mod memory;
pub mod sns;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum GatewayPublisherVia {
    Sns,
    Logs,
    Memory,
}

impl Display for GatewayPublisherVia {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            GatewayPublisherVia::Sns => write!(f, "Sns"),
            GatewayPublisherVia::Logs => write!(f, "Logs"),
            GatewayPublisherVia::Memory => write!(f, "Memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_format_via() {
        assert_eq!("Sns", GatewayPublisherVia::Sns.to_string());
        assert_eq!("Logs", GatewayPublisherVia::Logs.to_string());
        assert_eq!("Memory", GatewayPublisherVia::Memory.to_string());
    }
}
