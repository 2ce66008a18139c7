use crate::types::{Step, StepId};

/// An ordered set of steps solving a stated goal.
///
/// Plans are assembled by [`PlanBuilder`] and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Plan {
    id: StepId,
    goal: String,
    steps: Vec<Step>,
    #[serde(rename = "resultOutputs")]
    result_outputs: Vec<String>,
}

impl Plan {
    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Variable names surfaced as the plan's overall result, in contribution order.
    pub fn result_outputs(&self) -> &[String] {
        &self.result_outputs
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps that could not be resolved when the plan was parsed.
    pub fn missing_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.missing)
    }

    /// The plan as a step tree rooted at a goal step.
    pub fn to_root_step(&self) -> Step {
        let mut root = Step::goal(self.id, self.goal.clone(), self.steps.clone());
        root.outputs = self.result_outputs.clone();
        root.contributes_to_result = self.result_outputs.clone();
        root
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

#[derive(Debug)]
pub struct PlanBuilder {
    goal: String,
    steps: Vec<Step>,
    result_outputs: Vec<String>,
    next_id: usize,
}

impl PlanBuilder {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            steps: Vec::new(),
            result_outputs: Vec::new(),
            // 0 is the root.
            next_id: 1,
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn set_goal(&mut self, goal: impl Into<String>) {
        self.goal = goal.into();
    }

    pub fn next_id(&mut self) -> StepId {
        let id = StepId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends a step; its result contributions extend the plan's result outputs.
    pub fn push(&mut self, step: Step) -> &mut Self {
        self.result_outputs
            .extend(step.contributes_to_result.iter().cloned());
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn build(self) -> Plan {
        Plan {
            id: StepId(0),
            goal: self.goal,
            steps: self.steps,
            result_outputs: self.result_outputs,
        }
    }
}
