//! Timeline: очередь отложенных задач по монотонным часам
//!
//! Заменяет coroutine suspension: задача "засыпает" до deadline,
//! хост продвигает время через `pop_due(now)` на том же логическом потоке.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: f64,
    task: T,
}

/// Timer queue, отсортированная по deadline (FIFO при равных deadline)
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    pending: VecDeque<Scheduled<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запланировать задачу на момент `due` (секунды)
    pub fn schedule(&mut self, due: f64, task: T) {
        let index = self.pending.partition_point(|entry| entry.due <= due);
        self.pending.insert(index, Scheduled { due, task });
    }

    /// Достать следующую задачу с deadline ≤ now
    pub fn pop_due(&mut self, now: f64) -> Option<T> {
        if self.pending.front()?.due <= now {
            self.pending.pop_front().map(|entry| entry.task)
        } else {
            None
        }
    }

    /// Отменить всё (deactivate) и вернуть отменённые задачи
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.pending.drain(..).map(|entry| entry.task)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
