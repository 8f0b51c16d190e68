use super::*;

#[test]
fn claim_status_class_marks_known_states() {
    assert_eq!(claim_status_class("reserved"), "badge badge--reserved");
    assert_eq!(claim_status_class("picked_up"), "badge badge--picked-up");
    assert_eq!(claim_status_class("expired"), "badge");
}

#[test]
fn claimed_summary_falls_back_to_portions() {
    let claim: MyClaim =
        serde_json::from_value(serde_json::json!({"claim_id": 9, "claimed_quantity": "2", "unit": ""})).unwrap();
    assert_eq!(claimed_summary(&claim), "Claimed: 2 portions");

    let claim: MyClaim =
        serde_json::from_value(serde_json::json!({"claim_id": 9, "claimed_quantity": 3, "unit": "kg"})).unwrap();
    assert_eq!(claimed_summary(&claim), "Claimed: 3 kg");
}
