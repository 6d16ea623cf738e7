pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn ack_serializes_with_success_status() {
        let ack = types::Ack::success("done");
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "done", "status": "success" }));
    }
}
