//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Deferred handler work.
//!
//! Handlers never answer from inside the dispatch that triggered them when
//! the answer is itself a negotiation. They queue a task instead, and the
//! engine runs it on the next [`TelnetEngine::run_deferred`] call.
//!
//! [`TelnetEngine::run_deferred`]: crate::TelnetEngine::run_deferred

use crate::TelnetOption;
use std::time::{Duration, Instant};

/// One queued piece of handler work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredTask {
    /// Option whose handler receives the task
    pub option: TelnetOption,
    /// Handler defined task identifier
    pub task: u32,
    /// Earliest time the task may run
    pub due: Instant,
    seq: u64,
}

/// Time ordered queue of [`DeferredTask`]s.
#[derive(Clone, Debug, Default)]
pub struct DeferredQueue {
    tasks: Vec<DeferredTask>,
    next_seq: u64,
}

impl DeferredQueue {
    /// Creates an empty queue.
    pub fn new() -> DeferredQueue {
        DeferredQueue::default()
    }

    /// Queues `task` for `option`, due `delay` after `now`.
    pub fn schedule(&mut self, option: TelnetOption, task: u32, now: Instant, delay: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(DeferredTask {
            option,
            task,
            due: now + delay,
            seq,
        });
    }

    /// Drops every queued task of `option`.
    pub fn cancel_option(&mut self, option: TelnetOption) {
        self.tasks.retain(|task| task.option != option);
    }

    /// Drops one queued task of `option`.
    pub fn cancel(&mut self, option: TelnetOption, task: u32) {
        self.tasks
            .retain(|queued| queued.option != option || queued.task != task);
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Removes and returns every task due at `now`, oldest deadline first.
    /// Ties keep scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<DeferredTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = pending;
        due.sort_by_key(|task| (task.due, task.seq));
        due
    }

    /// Whether `option` has a task of kind `task` queued.
    pub fn contains(&self, option: TelnetOption, task: u32) -> bool {
        self.tasks
            .iter()
            .any(|queued| queued.option == option && queued.task == task)
    }

    /// Earliest deadline in the queue.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
