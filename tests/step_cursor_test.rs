// Step cursor and stage list behavior as seen by diagram components

use math_diagrams_wasm::stepper::{StageList, StageListBuilder, StepCursor};
use math_diagrams_wasm::DiagramError;

#[test]
fn test_five_stages_six_advances() {
    let mut cursor = StepCursor::new(5, 0).unwrap();
    let mut seen = Vec::new();
    for _ in 0..6 {
        seen.push(cursor.advance());
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 4, 4]);
    assert_eq!(cursor.index(), 4);
}

#[test]
fn test_boundaries_are_noops() {
    let mut cursor = StepCursor::new(3, 0).unwrap();
    assert_eq!(cursor.retreat(), 0);

    cursor.seek(2);
    assert_eq!(cursor.advance(), 2);
    assert_eq!(cursor.retreat(), 1);
}

#[test]
fn test_invalid_stage_count() {
    assert_eq!(
        StepCursor::new(0, 3).unwrap_err(),
        DiagramError::InvalidStageCount { total: 0 }
    );
    assert!(StageList::new(Vec::new(), 0).is_err());
}

#[test]
fn test_visibility_is_pure_function_of_index() {
    let mut cursor = StepCursor::new(6, 0).unwrap();
    cursor.seek(4);
    let forward: Vec<bool> = (0..6).map(|t| cursor.is_at_or_after(t)).collect();

    // Arrive at index 4 from the other direction
    cursor.seek(5);
    cursor.retreat();
    let backward: Vec<bool> = (0..6).map(|t| cursor.is_at_or_after(t)).collect();

    assert_eq!(forward, backward);
    assert_eq!(forward, vec![true, true, true, true, true, false]);
}

#[test]
fn test_fraction_diagram_stages() {
    // A fraction bar diagram that only shows simplification when it applies
    let can_simplify = false;
    let mut stages = StageListBuilder::new()
        .push("whole")
        .push("partition")
        .push("shade")
        .push_if(can_simplify, "simplify")
        .push("label")
        .build()
        .unwrap();

    assert_eq!(stages.len(), 4);
    assert!(stages.index_of("simplify").is_none());

    for _ in 0..10 {
        stages.advance();
    }
    assert!(stages.is_current("label"));
    assert!(stages.is_visible("whole"));
    assert!(!stages.is_visible("simplify"));
}
