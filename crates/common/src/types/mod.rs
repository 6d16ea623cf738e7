use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Acknowledgement returned by mutating operations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub message: String,
    pub status: String,
}

impl Ack {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: "success".to_string() }
    }
}
