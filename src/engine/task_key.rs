use std::collections::HashMap;

use uuid::Uuid;

use crate::model::Task;

/// Spreadsheet-column name for a zero-based index: `A`..`Z`, `AA`, `AB`, ...
pub fn key_for_index(index: usize) -> String {
    let mut letters = Vec::new();
    let mut i = index as i64;
    while i >= 0 {
        letters.push(char::from(b'A' + (i % 26) as u8));
        i = i / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Keys for every task in `tasks`, ordered by creation time.
///
/// The sort is stable, so tasks created at the same instant keep their
/// input order. Keys are assigned across the whole list, not per project.
pub fn assign_task_keys(tasks: &[Task]) -> HashMap<Uuid, String> {
    let mut order: Vec<&Task> = tasks.iter().collect();
    order.sort_by_key(|t| t.created_at);
    order
        .into_iter()
        .enumerate()
        .map(|(i, t)| (t.id, key_for_index(i)))
        .collect()
}
