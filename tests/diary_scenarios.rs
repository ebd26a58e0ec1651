//! End-to-end scenarios driving the diary through its public API.

use inline_diary::{AddRejected, DiaryState, IdPolicy};

fn contents(state: &DiaryState) -> Vec<(usize, &str, &str)> {
    state
        .get_entries()
        .iter()
        .map(|e| (e.id, e.title.as_str(), e.body.as_str()))
        .collect()
}

#[test]
fn add_two_then_delete_first() {
    let mut state = DiaryState::new();
    state.add_entry("A", "1").unwrap();
    state.add_entry("B", "2").unwrap();
    assert_eq!(contents(&state), [(1, "A", "1"), (2, "B", "2")]);

    assert!(state.delete_entry(1));
    assert_eq!(contents(&state), [(2, "B", "2")]);
}

#[test]
fn re_adding_after_delete_with_monotonic_ids() {
    let mut state = DiaryState::with_id_policy(IdPolicy::Monotonic);
    state.add_entry("A", "1").unwrap();
    state.add_entry("B", "2").unwrap();
    state.delete_entry(1);
    state.add_entry("C", "3").unwrap();

    assert_eq!(contents(&state), [(2, "B", "2"), (3, "C", "3")]);
}

#[test]
fn re_adding_after_delete_with_derived_ids_duplicates() {
    let mut state = DiaryState::with_id_policy(IdPolicy::Derived);
    state.add_entry("A", "1").unwrap();
    state.add_entry("B", "2").unwrap();
    state.delete_entry(1);
    state.add_entry("C", "3").unwrap();

    assert_eq!(contents(&state), [(2, "B", "2"), (2, "C", "3")]);
}

#[test]
fn dialog_round_trip() {
    let mut state = DiaryState::new();

    state.open_dialog();
    state.set_draft_title("Morning".into());
    assert_eq!(state.confirm_dialog(), Err(AddRejected::EmptyBody));
    assert!(state.dialog().open);

    state.set_draft_body("coffee".into());
    assert_eq!(state.confirm_dialog(), Ok(1));
    assert!(!state.dialog().open);

    state.open_dialog();
    state.set_draft_title("Evening".into());
    state.cancel_dialog();
    assert_eq!(contents(&state), [(1, "Morning", "coffee")]);

    state.open_dialog();
    assert!(state.dialog().draft_title.is_empty());
}

#[test]
fn edit_cycle_keeps_single_editor() {
    let mut state = DiaryState::new();
    for (t, b) in [("A", "1"), ("B", "2"), ("C", "3")] {
        state.add_entry(t, b).unwrap();
    }

    state.begin_edit(1);
    state.begin_edit(3);
    let snapshot = state.snapshot();
    let editing: Vec<_> = (0..snapshot.entries.len())
        .filter(|&row| snapshot.is_editing_row(row))
        .map(|row| snapshot.entries[row].id)
        .collect();
    assert_eq!(editing, [3]);

    state.commit_edit(3, "C!", "33");
    assert!(state.editing_row().is_none());
    assert_eq!(contents(&state), [(1, "A", "1"), (2, "B", "2"), (3, "C!", "33")]);
}

#[test]
fn unknown_ids_are_silent_noops() {
    let mut state = DiaryState::new();
    state.add_entry("A", "1").unwrap();

    state.begin_edit(7);
    assert!(state.editing_row().is_none());
    assert!(!state.delete_entry(7));
    state.commit_edit(7, "x", "y");

    assert_eq!(contents(&state), [(1, "A", "1")]);
}

#[test]
fn duplicate_ids_keep_a_single_editor() {
    let mut state = DiaryState::with_id_policy(IdPolicy::Derived);
    state.add_entry("A", "1").unwrap();
    state.add_entry("B", "2").unwrap();
    state.delete_entry(1);
    state.add_entry("C", "3").unwrap();

    state.begin_edit(2);
    let snapshot = state.snapshot();
    let editing = (0..snapshot.entries.len())
        .filter(|&row| snapshot.is_editing_row(row))
        .count();
    assert_eq!(editing, 1);

    state.begin_edit_at(1);
    state.commit_edit_at(1, "C!", "3");
    assert_eq!(contents(&state), [(2, "B", "2"), (2, "C!", "3")]);
}
