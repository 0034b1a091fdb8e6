use taskai_ai::{Gateway, prompts};
use taskai_core::{Task, View, Workspace, parse_plan, task};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ControllerError;
use crate::pending::{CallTracker, Completed, PendingCall, Phase};

pub struct TasksController {
    gateway: Gateway,
    calls: CallTracker,
    goal: Option<String>,
    plan: Option<String>,
}

impl TasksController {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            calls: CallTracker::default(),
            goal: None,
            plan: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.calls.phase()
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    /// Model-written plan waiting to be accepted or discarded.
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    pub fn add(&mut self, workspace: &mut Workspace, title: &str) -> Result<Uuid, ControllerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ControllerError::EmptyInput);
        }
        let task = Task::new(title);
        let id = task.id;
        workspace.tasks = task::prepend(&workspace.tasks, task);
        Ok(id)
    }

    pub fn toggle(&mut self, workspace: &mut Workspace, id: Uuid) {
        workspace.tasks = task::toggle(&workspace.tasks, id);
    }

    pub fn remove(&mut self, workspace: &mut Workspace, id: Uuid) -> bool {
        let before = workspace.tasks.len();
        workspace.tasks = task::remove(&workspace.tasks, id);
        before != workspace.tasks.len()
    }

    /// Asks the model to break `goal` into steps. Any unaccepted plan is dropped.
    pub fn generate_plan(&mut self, goal: &str) -> Result<PendingCall, ControllerError> {
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(ControllerError::EmptyInput);
        }
        let ticket = self.calls.begin()?;
        self.goal = Some(goal.to_owned());
        self.plan = None;
        info!(goal, "generating plan");

        let gateway = self.gateway.clone();
        let goal = goal.to_owned();
        Ok(PendingCall::spawn(
            View::Tasks,
            ticket,
            prompts::PLAN_FAILURE,
            async move { gateway.plan_from_goal(&goal).await },
        ))
    }

    pub fn apply(&mut self, done: Completed) -> bool {
        if !self.calls.finish(done.ticket) {
            return false;
        }
        self.plan = Some(done.text);
        true
    }

    /// Turns the pending plan into tasks, in plan order, ahead of existing ones.
    ///
    /// Returns how many tasks were added. A plan with no list items adds none
    /// and is still consumed.
    pub fn accept_plan(&mut self, workspace: &mut Workspace) -> Result<usize, ControllerError> {
        let plan = self.plan.take().ok_or(ControllerError::NoPlan)?;
        let goal = self.goal.take();

        let batch = parse_plan(&plan)
            .into_iter()
            .map(|step| {
                let task = Task::new(step.title);
                match &goal {
                    Some(goal) => task.with_category(goal.as_str()),
                    None => task,
                }
            })
            .collect::<Vec<_>>();
        let added = batch.len();
        if added == 0 {
            warn!("plan contained no list items");
        }

        workspace.tasks = task::prepend_all(&workspace.tasks, batch);
        info!(added, total = workspace.tasks.len(), "plan accepted");
        Ok(added)
    }

    /// Drops the pending plan. A plan still being generated is abandoned too.
    pub fn discard_plan(&mut self) {
        self.calls.abandon();
        self.plan = None;
        self.goal = None;
    }

    pub fn abandon(&mut self) -> bool {
        self.calls.abandon()
    }
}
