
use _fixtures::{hex_to_hash, sample_record, SAMPLE_LEAVES, SAMPLE_ROOT};
use meeting_merkle::{verify_document_str, ProofDocument, ValidationError};
use serde_json::{json, Value};

fn document_value(index: usize) -> Value {
    let document = ProofDocument::from_record(sample_record(), index).expect("document");
    serde_json::to_value(&document).expect("encode")
}

fn parse_err(value: &Value) -> String {
    ProofDocument::from_value(value).unwrap_err().to_string()
}

#[test]
fn every_sample_document_verifies() {
    for index in 0..3 {
        let text = document_value(index).to_string();
        let report = verify_document_str(&text).unwrap();
        assert!(report.verified(), "document {index}");
        assert_eq!(report.index, index);
        assert_eq!(report.computed_leaf, hex_to_hash(SAMPLE_LEAVES[index]));
        assert_eq!(report.computed_root.to_hex(), SAMPLE_ROOT);
    }
}

#[test]
fn uppercase_digests_are_accepted() {
    let mut value = document_value(1);
    value["root"] = json!(SAMPLE_ROOT.to_uppercase());
    value["leaf"] = json!(SAMPLE_LEAVES[1].to_uppercase());
    let document = ProofDocument::from_value(&value).unwrap();
    assert!(document.verify().verified());
}

#[test]
fn legacy_id_key_is_accepted() {
    let mut value = document_value(0);
    let id = value.as_object_mut().unwrap().remove("meeting_id").unwrap();
    value["id"] = id;
    let document = ProofDocument::from_value(&value).unwrap();
    assert_eq!(document.meeting_id, "Team-Weekly-2025-09-18");
}

#[test]
fn tampered_notes_break_the_leaf_binding() {
    let mut value = document_value(0);
    value["item"]["notes"] = json!("Allocate 5000 tokens to community fund.");
    let report = verify_document_str(&value.to_string()).unwrap();
    assert!(!report.leaf_ok);
    assert!(!report.verified());
}

#[test]
fn dropped_salt_breaks_the_leaf_binding() {
    let mut value = document_value(2);
    value.as_object_mut().unwrap().remove("salt");
    let report = verify_document_str(&value.to_string()).unwrap();
    assert!(!report.leaf_ok);
}

#[test]
fn swapped_step_position_breaks_the_root() {
    let mut value = document_value(1);
    value["proof"][0]["position"] = json!("right");
    let report = verify_document_str(&value.to_string()).unwrap();
    assert!(report.leaf_ok);
    assert!(!report.root_ok);
}

#[test]
fn foreign_root_is_reported_not_raised() {
    let mut value = document_value(1);
    value["root"] = json!("ab".repeat(32));
    let report = verify_document_str(&value.to_string()).unwrap();
    assert!(report.leaf_ok);
    assert!(!report.root_ok);
    assert_eq!(report.computed_root.to_hex(), SAMPLE_ROOT);
}

#[test]
fn malformed_digests_are_validation_errors() {
    let mut value = document_value(0);
    value["leaf"] = json!("zz".repeat(32));
    assert_eq!(parse_err(&value), "leaf must be a 32-byte hex string");

    let mut value = document_value(0);
    value["root"] = json!(&SAMPLE_ROOT[..62]);
    assert_eq!(parse_err(&value), "root must be a 32-byte hex string");

    let mut value = document_value(0);
    value["proof"][0]["hash"] = json!(null);
    assert_eq!(parse_err(&value), "proof hash must be a 32-byte hex string");
}

#[test]
fn structural_errors_are_validation_errors() {
    assert_eq!(parse_err(&json!(3)), "Proof document must be an object");

    let mut value = document_value(0);
    value["index"] = json!(1.5);
    assert_eq!(
        ProofDocument::from_value(&value).unwrap_err(),
        ValidationError::InvalidProofIndex
    );

    let mut value = document_value(0);
    value["proof"] = json!("b374");
    assert_eq!(parse_err(&value), "proof must be an array of steps");

    let mut value = document_value(0);
    value["item"] = json!(null);
    assert_eq!(parse_err(&value), "item must be an object");

    let mut value = document_value(0);
    value["item"]["agenda"] = json!(["Budget"]);
    assert_eq!(parse_err(&value), "item.agenda must be a string");
}

#[test]
fn invalid_json_is_rejected_before_verification() {
    let err = verify_document_str("not json").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidJson { .. }));
}

#[test]
fn membership_proof_matches_the_tree() {
    let record = sample_record();
    let document = ProofDocument::from_record(record, 2).unwrap();
    let proof = document.membership_proof();
    assert_eq!(proof, record.tree().unwrap().prove(2).unwrap());
    assert!(proof.verify());
}

#[test]
fn out_of_range_document_index_is_a_tree_error() {
    let err = ProofDocument::from_record(sample_record(), 3).unwrap_err();
    assert!(err.as_tree().is_some());
    assert_eq!(err.to_string(), "Leaf index 3 is out of bounds");
}
