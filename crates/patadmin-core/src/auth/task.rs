use std::collections::VecDeque;

use patadmin_types::{Credentials, RegistrationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Network-bound intent kinds. Each kind runs at most one task at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SignIn,
    SignUp,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state for one kind (mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

/// Per-kind task slots plus the intents waiting for their slot to free up.
#[derive(Debug, Default)]
pub struct Tasks {
    pub sign_in: TaskState,
    pub sign_up: TaskState,
    pub queued_sign_ins: VecDeque<Credentials>,
    pub queued_sign_ups: VecDeque<RegistrationRequest>,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SignIn => &self.sign_in,
            TaskKind::SignUp => &self.sign_up,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignUp => &mut self.sign_up,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.sign_in.is_running() || self.sign_up.is_running()
    }

    pub fn queued(&self) -> usize {
        self.queued_sign_ins.len() + self.queued_sign_ups.len()
    }
}
