use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use datatable::{
    action_for_key, BodyView, Callbacks, CheckState, Column, DataTable, Identity, SortDirection,
    SortExecution, SortIndicator, TableAction, TableError, TableEvent, TableOptions,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct User {
    id: u32,
    name: String,
    role: String,
}

fn user(id: u32, name: &str, role: &str) -> User {
    User {
        id,
        name: name.to_string(),
        role: role.to_string(),
    }
}

fn users() -> Vec<User> {
    vec![
        user(1, "A", "Engineer"),
        user(2, "B", "Designer"),
        user(3, "C", "Analyst"),
    ]
}

fn columns() -> Vec<Column<User>> {
    vec![
        Column::new("id", "ID"),
        Column::new("name", "Name"),
        Column::new("role", "Role"),
    ]
}

fn selectable(data: Vec<User>) -> DataTable<User, Vec<TableEvent<User>>> {
    DataTable::new(data, columns())
        .unwrap()
        .with_options(TableOptions::default().with_selectable(true))
        .with_listener(Vec::new())
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_toggle_row_scenario() {
    let data = users();
    let mut table = selectable(data.clone());

    assert!(table.toggle_row(&data[0]));
    assert_eq!(table.selected(), &data[..1]);
    assert!(table.partially_selected());
    assert!(!table.all_selected());
    assert_eq!(table.check_state(), CheckState::Indeterminate);

    assert!(table.toggle_row(&data[0]));
    assert!(table.selected().is_empty());
    assert!(!table.partially_selected());

    assert_eq!(
        table.listener(),
        &vec![
            TableEvent::RowSelect(vec![data[0].clone()]),
            TableEvent::RowSelect(vec![]),
        ]
    );
}

#[test]
fn test_toggle_all_scenario() {
    let data = users();
    let mut table = selectable(data.clone());

    assert!(table.toggle_all());
    assert_eq!(table.selected(), data.as_slice());
    assert!(table.all_selected());
    assert_eq!(table.check_state(), CheckState::Checked);

    assert!(table.toggle_all());
    assert!(table.selected().is_empty());
    assert_eq!(table.check_state(), CheckState::Unchecked);
    assert_eq!(table.listener().len(), 2);
}

#[test]
fn test_toggle_all_from_partial_selects_all() {
    let data = users();
    let mut table = selectable(data.clone());
    table.toggle_row(&data[1]);

    table.toggle_all();
    assert!(table.all_selected());
    table.toggle_all();
    assert!(table.selected().is_empty());
}

#[test]
fn test_selection_stays_within_data() {
    let data = users();
    let mut table = selectable(data.clone());
    let script = [0usize, 2, 0, 1, 2, 1, 1, 0];

    for (step, &i) in script.iter().enumerate() {
        if step % 3 == 2 {
            table.toggle_all();
        } else {
            table.toggle_row(&data[i]);
        }
        assert!(table.selected().iter().all(|s| data.contains(s)));
        assert!(table.selected().len() <= data.len());
        assert_eq!(
            table.all_selected(),
            !data.is_empty() && table.selected().len() == data.len()
        );
    }
}

#[test]
fn test_toggle_row_ignores_records_outside_data() {
    let data = users();
    let mut table = selectable(data.clone());
    table.toggle_row(&data[0]);
    table.toggle_row(&data[1]);
    let events = table.listener().len();

    assert!(!table.toggle_row(&user(99, "Z", "Ghost")));
    assert_eq!(table.selected(), &data[..2]);
    assert!(!table.all_selected());
    assert_eq!(table.check_state(), CheckState::Indeterminate);
    assert_eq!(table.view().footer.as_deref(), Some("2 of 3 selected"));
    assert_eq!(table.listener().len(), events);
}

#[test]
fn test_stale_row_can_still_be_deselected() {
    let data = users();
    let mut table = selectable(data.clone());
    table.toggle_row(&data[2]);
    table.set_data(data[..2].to_vec());

    assert!(table.toggle_row(&data[2]));
    assert!(table.selected().is_empty());
    assert!(!table.toggle_row(&data[2]));
}

#[test]
fn test_empty_data_is_never_all_selected() {
    let mut table = selectable(Vec::new());
    assert!(!table.toggle_all());
    assert!(!table.all_selected());
    assert!(!table.partially_selected());
    assert!(table.listener().is_empty());
}

#[test]
fn test_structurally_equal_record_is_selected() {
    let data = users();
    let mut table = selectable(data.clone());
    table.toggle_row(&user(2, "B", "Designer"));
    assert!(table.is_selected(&data[1]));
    assert!(!table.is_selected(&user(2, "B", "Manager")));
}

#[test]
fn test_keyed_identity_survives_record_changes() {
    let data = users();
    let mut table =
        selectable(data.clone()).with_identity(Identity::keyed(|u: &User| u.id.to_string()));
    table.toggle_row(&data[0]);

    let mut updated = data.clone();
    updated[0].role = "Lead".to_string();
    table.set_data(updated.clone());

    assert!(table.is_selected(&updated[0]));
    assert!(!table.prune_selection());
}

#[test]
fn test_stale_selection_kept_until_pruned() {
    let data = users();
    let mut table = selectable(data.clone());
    table.toggle_all();

    table.set_data(data[..2].to_vec());
    assert_eq!(table.selected().len(), 3);

    assert!(table.prune_selection());
    assert_eq!(table.selected(), &data[..2]);
    assert!(table.all_selected());
    assert_eq!(
        table.listener().last(),
        Some(&TableEvent::RowSelect(data[..2].to_vec()))
    );
}

#[test]
fn test_controlled_selection_does_not_notify() {
    let data = users();
    let mut table = selectable(data.clone());
    table.set_selection(vec![data[2].clone()]).unwrap();
    assert!(table.is_selected(&data[2]));
    assert!(table.listener().is_empty());
}

#[test]
fn test_selection_disabled_when_not_selectable() {
    let data = users();
    let mut table = DataTable::new(data.clone(), columns())
        .unwrap()
        .with_listener(Vec::<TableEvent<User>>::new());

    assert!(!table.toggle_all());
    assert!(!table.toggle_row(&data[0]));
    assert!(table.selected().is_empty());
    assert!(table.listener().is_empty());
}

#[test]
fn test_loading_suppresses_interaction() {
    let data = users();
    let mut table = selectable(data.clone());
    table.set_loading(true);

    assert!(!table.toggle_all());
    assert!(!table.toggle_row(&data[0]));
    assert!(!table.activate_sort("name"));
    assert!(!table.dispatch(TableAction::CursorDown));
    assert!(table.listener().is_empty());

    table.set_loading(false);
    assert!(table.toggle_all());
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_scenario() {
    let mut table = selectable(users());

    assert!(table.activate_sort("name"));
    assert_eq!(table.sort_state().key.as_deref(), Some("name"));
    assert_eq!(table.sort_state().direction, SortDirection::Ascending);

    assert!(table.activate_sort("name"));
    assert_eq!(table.sort_state().direction, SortDirection::Descending);

    assert!(table.activate_sort("role"));
    assert_eq!(table.sort_state().key.as_deref(), Some("role"));
    assert_eq!(table.sort_state().direction, SortDirection::Ascending);
    assert_eq!(table.indicator_for("role"), SortIndicator::Ascending);
    assert_eq!(table.indicator_for("name"), SortIndicator::Inactive);

    assert_eq!(
        table.listener(),
        &vec![
            TableEvent::Sort {
                key: "name".into(),
                direction: SortDirection::Ascending
            },
            TableEvent::Sort {
                key: "name".into(),
                direction: SortDirection::Descending
            },
            TableEvent::Sort {
                key: "role".into(),
                direction: SortDirection::Ascending
            },
        ]
    );
}

#[test]
fn test_non_sortable_column_ignored() {
    let cols = vec![
        Column::new("name", "Name"),
        Column::new("role", "Role").sortable(false),
    ];
    let mut table = DataTable::new(users(), cols)
        .unwrap()
        .with_listener(Vec::<TableEvent<User>>::new());

    assert!(!table.activate_sort("role"));
    assert!(!table.activate_sort("missing"));
    assert_eq!(table.sort_state().key, None);
    assert!(table.listener().is_empty());
    assert!(!table.is_sortable("role"));
    assert!(table.is_sortable("name"));
}

#[test]
fn test_global_sort_switch() {
    let mut table = DataTable::new(users(), columns())
        .unwrap()
        .with_options(TableOptions::default().with_sortable(false));

    assert!(!table.activate_sort("name"));
    assert!(!table.is_sortable("name"));
    assert_eq!(table.sort_state().key, None);
}

#[test]
fn test_disabling_sort_clears_active_sort() {
    let mut table = DataTable::new(users(), columns()).unwrap();
    table.activate_sort("role");
    assert_eq!(table.order(), &[2, 1, 0]);

    table.set_options(TableOptions::default().with_sortable(false));
    assert_eq!(table.sort_state().key, None);
    assert_eq!(table.order(), &[0, 1, 2]);
    assert!(table.view().header.cells.iter().all(|c| c.sort.is_none()));

    table.set_options(TableOptions::default());
    assert_eq!(table.indicator_for("role"), SortIndicator::Inactive);
}

#[test]
fn test_internal_sort_orders_view() {
    let mut table = selectable(users());

    table.activate_sort("role");
    assert_eq!(table.order(), &[2, 1, 0]);
    let names: Vec<_> = table.rows().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);

    table.activate_sort("role");
    assert_eq!(table.order(), &[0, 1, 2]);

    table.activate_sort("id");
    assert_eq!(table.order(), &[0, 1, 2]);
    table.activate_sort("id");
    assert_eq!(table.order(), &[2, 1, 0]);
}

#[test]
fn test_host_sort_keeps_data_order() {
    let mut table = DataTable::new(users(), columns())
        .unwrap()
        .with_options(TableOptions::default().with_sort_execution(SortExecution::Host));

    table.activate_sort("role");
    assert_eq!(table.order(), &[0, 1, 2]);
    assert_eq!(table.indicator_for("role"), SortIndicator::Ascending);
}

#[test]
fn test_custom_comparator() {
    let data = vec![user(1, "bob", "x"), user(2, "Al", "x"), user(3, "cy", "x")];
    let mut table = DataTable::new(data, columns())
        .unwrap()
        .with_comparator("name", |a: &User, b: &User| {
            a.name.to_lowercase().cmp(&b.name.to_lowercase())
        })
        .unwrap();

    table.activate_sort("name");
    assert_eq!(table.order(), &[1, 0, 2]);
}

#[test]
fn test_comparator_for_unknown_column() {
    let result = DataTable::new(users(), columns())
        .unwrap()
        .with_comparator("email", |_: &User, _: &User| std::cmp::Ordering::Equal);
    assert_eq!(result.err(), Some(TableError::UnknownColumn("email".into())));
}

#[test]
fn test_set_columns_clears_unsortable_active_key() {
    let mut table = DataTable::new(users(), columns()).unwrap();
    table.activate_sort("role");

    let cols = vec![
        Column::new("id", "ID"),
        Column::new("name", "Name"),
        Column::new("role", "Role").sortable(false),
    ];
    table.set_columns(cols).unwrap();
    assert_eq!(table.sort_state().key, None);
    assert_eq!(table.order(), &[0, 1, 2]);
}

#[test]
fn test_duplicate_columns_rejected() {
    let cols = vec![Column::new("id", "ID"), Column::new("id", "Again")];
    let result = DataTable::new(users(), cols);
    assert_eq!(result.err(), Some(TableError::DuplicateColumn("id".into())));
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_callbacks_listener() {
    let data = users();
    let counts = Rc::new(RefCell::new((0usize, Vec::new())));
    let rows_seen = Rc::clone(&counts);
    let sorts_seen = Rc::clone(&counts);

    let mut table = selectable(data.clone()).with_listener(
        Callbacks::new()
            .with_row_select(move |rows: &[User]| rows_seen.borrow_mut().0 = rows.len())
            .with_sort(move |key, direction| {
                sorts_seen
                    .borrow_mut()
                    .1
                    .push(format!("{} {}", key, direction))
            }),
    );

    table.toggle_all();
    assert_eq!(counts.borrow().0, 3);
    table.toggle_row(&data[0]);
    assert_eq!(counts.borrow().0, 2);

    table.activate_sort("name");
    table.activate_sort("name");
    assert_eq!(counts.borrow().1, vec!["name asc", "name desc"]);
}

#[test]
fn test_channel_listener() {
    let data = users();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<TableEvent<User>>();
    let mut table = selectable(data.clone()).with_listener(tx);

    table.toggle_row(&data[1]);
    table.activate_sort("id");

    assert_eq!(
        rx.try_recv().ok(),
        Some(TableEvent::RowSelect(vec![data[1].clone()]))
    );
    assert_eq!(
        rx.try_recv().ok(),
        Some(TableEvent::Sort {
            key: "id".into(),
            direction: SortDirection::Ascending
        })
    );
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_channel_listener_with_dropped_receiver() {
    let data = users();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<TableEvent<User>>();
    drop(rx);
    let mut table = selectable(data.clone()).with_listener(tx);
    assert!(table.toggle_row(&data[0]));
}

// ============================================================================
// Input
// ============================================================================

fn press(code: KeyCode) -> TableAction {
    action_for_key(&KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
}

#[test]
fn test_keyboard_drives_selection_and_sort() {
    let data = users();
    let mut table = selectable(data.clone());

    assert!(!table.dispatch(press(KeyCode::Char(' '))));
    assert!(table.dispatch(press(KeyCode::Down)));
    assert!(table.dispatch(press(KeyCode::Down)));
    assert_eq!(table.cursor(), Some(1));

    assert!(table.dispatch(press(KeyCode::Char(' '))));
    assert_eq!(table.selected(), &data[1..2]);

    assert!(table.dispatch(press(KeyCode::Char('a'))));
    assert!(table.all_selected());

    assert!(table.dispatch(press(KeyCode::Char('3'))));
    assert_eq!(table.sort_state().key.as_deref(), Some("role"));
    assert!(!table.dispatch(TableAction::SortColumn(7)));
}

#[test]
fn test_toggle_by_position_follows_display_order() {
    let data = users();
    let mut table = selectable(data.clone());
    table.activate_sort("id");
    table.activate_sort("id");

    assert!(table.dispatch(TableAction::ToggleRow(0)));
    assert_eq!(table.selected(), &data[2..]);
    assert!(!table.dispatch(TableAction::ToggleRow(9)));
}

// ============================================================================
// View
// ============================================================================

#[test]
fn test_empty_and_loading_states() {
    let mut table = DataTable::new(Vec::<User>::new(), columns())
        .unwrap()
        .with_options(TableOptions::default().with_empty_message("Nobody here"));

    match table.view().body {
        BodyView::Empty { title, message } => {
            assert_eq!(title, "No data found");
            assert_eq!(message, "Nobody here");
        }
        other => panic!("expected empty state, got {:?}", other),
    }

    table.set_loading(true);
    assert_eq!(
        table.view().body,
        BodyView::Skeleton {
            rows: 5,
            columns: 3,
            checkbox: false
        }
    );
    assert_eq!(table.view().footer, None);
}

#[test]
fn test_view_rows_and_header() {
    let data = users();
    let mut table = selectable(data.clone());
    table.toggle_row(&data[2]);
    table.activate_sort("name");
    table.activate_sort("name");

    let view = table.view();
    assert_eq!(view.header.select_all, Some(CheckState::Indeterminate));
    assert_eq!(view.header.cells[1].sort, Some(SortIndicator::Descending));
    assert_eq!(view.header.cells[0].sort, Some(SortIndicator::Inactive));

    let rows = view.body.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].index, 2);
    assert_eq!(rows[0].selected, Some(true));
    assert_eq!(rows[1].selected, Some(false));
    assert_eq!(rows[0].cells[1].text, "C");
    assert_eq!(view.footer.as_deref(), Some("1 of 3 selected"));
}

#[test]
fn test_view_without_selection() {
    let table = DataTable::new(users(), columns()).unwrap();
    let view = table.view();
    assert_eq!(view.header.select_all, None);
    assert!(view.body.rows().iter().all(|r| r.selected.is_none()));
    assert_eq!(view.footer.as_deref(), Some("Showing 3 results"));
}
