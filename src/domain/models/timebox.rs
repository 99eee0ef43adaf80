//! Sprint / timebox domain model.

use serde::{Deserialize, Serialize};

/// A sprint grouping tasks from the plan into one remote sprint issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBox {
    /// Sprint name; doubles as the `sprint: {name}` label suffix.
    pub name: String,
    /// Free-form status, conventionally PLANNED / IN_PROGRESS / CLOSED.
    /// Unknown values are kept and take the default label color.
    #[serde(default)]
    pub status: String,
    /// References to the tasks scheduled in this sprint.
    #[serde(default, alias = "sprintItems", skip_serializing_if = "Vec::is_empty")]
    pub sprint_items: Vec<SprintItem>,
}

/// One scheduled task reference inside a timebox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintItem {
    /// Domain id of the referenced task.
    pub issue: String,
}

impl TimeBox {
    /// Domain ids of the tasks this sprint references, in declared order.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.sprint_items.iter().map(|item| item.issue.as_str())
    }
}

/// Label color for a timebox status.
///
/// Case-insensitive on the three canonical names; anything else takes the
/// default gray.
pub fn status_color(status: &str) -> &'static str {
    match status.to_uppercase().as_str() {
        "PLANNED" => "FEF2C0",
        "IN_PROGRESS" => "0E8A16",
        "CLOSED" => "5319E7",
        _ => "CCCCCC",
    }
}
