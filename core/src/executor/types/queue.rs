use super::task::Task;

/// Tasks that start together and are joined together.
#[derive(Debug, Clone, Default)]
pub struct Group {
    tasks: Vec<Task>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Tasks in recording order. Execution order within a group is unspecified.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

/// A finalized, immutable sequence of groups.
///
/// Group `i + 1` never starts before every task of group `i` has settled.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    groups: Vec<Group>,
}

impl Queue {
    pub(crate) fn from_groups(groups: Vec<Group>) -> Self {
        Self {
            groups: groups.into_iter().filter(|g| !g.is_empty()).collect(),
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Task labels per group, for plans and debugging.
    pub fn layout(&self) -> Vec<Vec<String>> {
        self.groups
            .iter()
            .map(|g| g.tasks().iter().map(Task::label).collect())
            .collect()
    }

    pub(crate) fn into_groups(self) -> Vec<Group> {
        self.groups
    }
}
