use serde::{Deserialize, Serialize};

/// Query state names as reported in `stats.state`.
pub const STATE_RUNNING: &str = "RUNNING";
pub const STATE_FINISHED: &str = "FINISHED";
pub const STATE_FAILED: &str = "FAILED";

/// Execution counters attached to every response.
///
/// Counters the gateway does not compute stay at zero; the object itself is
/// always serialized since clients assume its presence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatementStats {
    pub state: String,
    pub queued: bool,
    pub scheduled: bool,
    pub progress_percentage: f32,
    pub running_percentage: f32,
    pub nodes: u32,
    pub total_splits: u64,
    pub queued_splits: u64,
    pub running_splits: u64,
    pub completed_splits: u64,
    pub cpu_time_millis: u64,
    pub wall_time_millis: u64,
    pub queued_time_millis: u64,
    pub elapsed_time_millis: u64,
    pub processed_rows: u64,
    pub processed_bytes: u64,
    pub physical_input_bytes: u64,
    pub physical_written_bytes: u64,
    pub peak_memory_bytes: u64,
    pub spilled_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_stage: Option<StageStats>,
}

impl StatementStats {
    pub fn with_state(state: &str) -> Self {
        StatementStats {
            state: state.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StageStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<String>,
    pub state: String,
    pub done: bool,
    pub nodes: u32,
    pub total_splits: u64,
    pub queued_splits: u64,
    pub running_splits: u64,
    pub completed_splits: u64,
    pub cpu_time_millis: u64,
    pub wall_time_millis: u64,
    pub processed_rows: u64,
    pub processed_bytes: u64,
    pub physical_input_bytes: u64,
    pub failed_tasks: u64,
    pub coordinator_only: bool,
    pub sub_stages: Vec<StageStats>,
}
