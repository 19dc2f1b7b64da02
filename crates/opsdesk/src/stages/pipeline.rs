//! Pipeline widget classification.
//!
//! A pure view model: given a department's catalog and the record's current
//! stage, classify every node and answer whether a click on a node may
//! request a transition. The backend remains authoritative for legality;
//! the only client-side restriction is that terminal nodes are not offered.

use serde::Serialize;

use super::model::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageNodeState {
    /// Strictly before the current stage.
    Completed,
    /// Exact `stage_code` match with the record's stage.
    Current,
    /// Terminal and not current; never offered as a click target.
    Terminal,
    /// Everything else.
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageNode {
    pub stage_code: String,
    pub stage_name: String,
    pub stage_order: i32,
    pub state: StageNodeState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineView {
    pub nodes: Vec<StageNode>,
    pub disabled: bool,
    current_code: Option<String>,
}

impl PipelineView {
    pub fn build(stages: &[Stage], current_code: Option<&str>, disabled: bool) -> Self {
        let current = current_code.and_then(|code| stages.iter().find(|s| s.stage_code == code));
        let current_order = current.map(|s| s.stage_order);

        let nodes = stages
            .iter()
            .map(|stage| {
                let state = classify(stage, current.map(|c| c.stage_code.as_str()), current_order);
                StageNode {
                    stage_code: stage.stage_code.clone(),
                    stage_name: stage.stage_name.clone(),
                    stage_order: stage.stage_order,
                    state,
                }
            })
            .collect();

        Self {
            nodes,
            disabled,
            current_code: current.map(|s| s.stage_code.clone()),
        }
    }

    /// The no-stages-configured state.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn current_code(&self) -> Option<&str> {
        self.current_code.as_deref()
    }

    /// Whether a click on `stage_code` may request a transition.
    ///
    /// Denied when the widget is disabled, when no current stage resolved,
    /// when the target does not exist, or when the target is terminal.
    pub fn can_advance_to(&self, stage_code: &str) -> bool {
        if self.disabled || self.current_code.is_none() {
            return false;
        }
        self.nodes
            .iter()
            .find(|node| node.stage_code == stage_code)
            .is_some_and(|node| node.state != StageNodeState::Terminal)
    }
}

fn classify(stage: &Stage, current_code: Option<&str>, current_order: Option<i32>) -> StageNodeState {
    if current_code == Some(stage.stage_code.as_str()) {
        return StageNodeState::Current;
    }
    if let Some(current_order) = current_order {
        if stage.stage_order < current_order {
            return StageNodeState::Completed;
        }
    }
    if stage.is_terminal {
        return StageNodeState::Terminal;
    }
    StageNodeState::Upcoming
}
