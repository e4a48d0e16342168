/// Integration tests for feature encoding and reindexing
///
/// Run with: cargo test --test feature_alignment -- --nocapture

mod common;

use nba_injury_predictor::features::{reindex, FeatureRecord, FEATURE_COLUMNS};
use nba_injury_predictor::reference::InjuryType;

fn jane_record() -> FeatureRecord {
    FeatureRecord {
        days_injured: 231,
        injury_occurrences: 1,
        position: 1.0,
        injury_type: InjuryType::AnkleSprain,
        age: 25.0,
        player_height: 190.0,
        player_weight: 85.0,
    }
}

#[test]
fn test_encode_replaces_injury_label_with_code() {
    println!("\n=== Test: Encode ===");
    let row = jane_record().encode();
    let names: Vec<&str> = row.iter().map(|(c, _)| *c).collect();
    assert_eq!(names, FEATURE_COLUMNS);
    assert_eq!(
        row.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        vec![231.0, 1.0, 1.0, 11.0, 25.0, 190.0, 85.0]
    );
    println!("✓ Row: {:?}", row);
}

#[test]
fn test_reindex_reorders_fills_and_drops() {
    println!("\n=== Test: Reindex ===");
    let schema = common::trained_schema();
    let mut row = jane_record().encode();
    row.push(("season", 2022.0));

    let aligned = reindex(&row, &schema);
    assert_eq!(aligned.values.len(), schema.len());
    assert_eq!(
        aligned.values,
        vec![25.0, 190.0, 85.0, 1.0, 11.0, 231.0, 1.0, 0.0]
    );
    assert_eq!(aligned.zero_filled, vec!["team_pace".to_string()]);
    assert_eq!(aligned.dropped, vec!["season".to_string()]);
    println!("✓ Aligned: {:?}", aligned.values);
}

#[test]
fn test_reindex_edge_cases() {
    println!("\n=== Test: Reindex Edge Cases ===");
    let row = jane_record().encode();

    // Empty schema: everything dropped, nothing sent
    let aligned = reindex(&row, &[]);
    assert!(aligned.values.is_empty());
    assert_eq!(aligned.dropped.len(), FEATURE_COLUMNS.len());
    println!("✓ Empty schema handled");

    // Empty row: every expected column zero-filled
    let schema: Vec<String> = vec!["a".into(), "b".into()];
    let aligned = reindex(&[], &schema);
    assert_eq!(aligned.values, vec![0.0, 0.0]);
    assert_eq!(aligned.zero_filled, schema);
    println!("✓ Empty row handled");

    // Identical schema: unchanged
    let schema: Vec<String> = FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect();
    let aligned = reindex(&row, &schema);
    assert_eq!(aligned.values, row.iter().map(|(_, v)| *v).collect::<Vec<_>>());
    assert!(aligned.zero_filled.is_empty() && aligned.dropped.is_empty());
    println!("✓ Matching schema passes through");
}
