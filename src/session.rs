use crate::date_key::DateKey;
use crate::errors::ChecklistError;
use crate::gesture::DragGesture;
use crate::models::{Task, TaskId, TaskRecord};
use crate::storage::Store;
use std::collections::HashSet;
use tracing::{debug, info};

/// Mutations replace `tasks` only after the store accepted the new list.
#[derive(Debug, Clone)]
pub struct Session {
    date: DateKey,
    tasks: Vec<Task>,
}

impl Session {
    pub async fn open(store: &mut Store, date: DateKey) -> Result<Self, ChecklistError> {
        let tasks = load_tasks(store, &date).await?;
        Ok(Self { date, tasks })
    }

    pub fn date(&self) -> &DateKey {
        &self.date
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub async fn select_date(
        &mut self,
        store: &mut Store,
        date: DateKey,
    ) -> Result<&[Task], ChecklistError> {
        let tasks = load_tasks(store, &date).await?;
        info!("selected {date} ({} tasks)", tasks.len());
        self.date = date;
        self.tasks = tasks;
        Ok(&self.tasks)
    }

    /// Blank text is ignored and returns the list unchanged.
    pub async fn add_task(&mut self, store: &mut Store, text: &str) -> Result<&[Task], ChecklistError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank task");
            return Ok(&self.tasks);
        }

        let mut next = self.tasks.clone();
        next.push(Task::new(text));
        self.commit(store, next).await
    }

    pub async fn toggle_task(
        &mut self,
        store: &mut Store,
        index: usize,
    ) -> Result<&[Task], ChecklistError> {
        let mut next = self.tasks.clone();
        let len = next.len();
        let task = next
            .get_mut(index)
            .ok_or(ChecklistError::Index { index, len })?;
        task.done = !task.done;
        self.commit(store, next).await
    }

    pub async fn delete_task(
        &mut self,
        store: &mut Store,
        index: usize,
    ) -> Result<&[Task], ChecklistError> {
        self.check_index(index)?;
        let mut next = self.tasks.clone();
        next.remove(index);
        self.commit(store, next).await
    }

    /// `order` lists the current indices in their new order and must be a
    /// permutation of `0..len`.
    pub async fn reorder(
        &mut self,
        store: &mut Store,
        order: &[usize],
    ) -> Result<&[Task], ChecklistError> {
        let len = self.tasks.len();
        if order.len() != len {
            return Err(ChecklistError::InvalidOrder(format!(
                "expected {len} positions, got {}",
                order.len()
            )));
        }
        let mut seen = vec![false; len];
        for &index in order {
            if index >= len {
                return Err(ChecklistError::InvalidOrder(format!(
                    "position {index} is out of range for a list of {len}"
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(ChecklistError::InvalidOrder(format!(
                    "position {index} appears more than once"
                )));
            }
        }

        let next = order.iter().map(|&index| self.tasks[index].clone()).collect();
        self.commit(store, next).await
    }

    pub async fn toggle(&mut self, store: &mut Store, id: TaskId) -> Result<&[Task], ChecklistError> {
        let index = self.position(id)?;
        self.toggle_task(store, index).await
    }

    pub async fn delete(&mut self, store: &mut Store, id: TaskId) -> Result<&[Task], ChecklistError> {
        let index = self.position(id)?;
        self.delete_task(store, index).await
    }

    pub async fn reorder_ids(
        &mut self,
        store: &mut Store,
        ids: &[TaskId],
    ) -> Result<&[Task], ChecklistError> {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut order = Vec::with_capacity(ids.len());
        for &id in ids {
            if !seen.insert(id) {
                return Err(ChecklistError::InvalidOrder(format!(
                    "task {id} appears more than once"
                )));
            }
            order.push(self.position(id)?);
        }
        self.reorder(store, &order).await
    }

    /// Completes a drag of `id` onto slot `to`.
    pub async fn move_task(
        &mut self,
        store: &mut Store,
        id: TaskId,
        to: usize,
    ) -> Result<&[Task], ChecklistError> {
        let mut drag = DragGesture::begin(self.position(id)?, self.tasks.len())?;
        drag.hover(to);
        let order = drag.finish();
        self.reorder(store, &order).await
    }

    pub fn position(&self, id: TaskId) -> Result<usize, ChecklistError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(ChecklistError::UnknownTask(id))
    }

    fn check_index(&self, index: usize) -> Result<(), ChecklistError> {
        let len = self.tasks.len();
        if index >= len {
            return Err(ChecklistError::Index { index, len });
        }
        Ok(())
    }

    async fn commit(&mut self, store: &mut Store, next: Vec<Task>) -> Result<&[Task], ChecklistError> {
        let records: Vec<TaskRecord> = next.iter().map(Task::to_record).collect();
        store.save(&self.date, &records).await?;
        debug!("saved {} tasks for {}", records.len(), self.date);
        self.tasks = next;
        Ok(&self.tasks)
    }
}

async fn load_tasks(store: &mut Store, date: &DateKey) -> Result<Vec<Task>, ChecklistError> {
    let records = store.load(date).await?;
    Ok(records.into_iter().map(Task::from_record).collect())
}
