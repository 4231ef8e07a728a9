//! A queue of interventions scheduled by day
//!
//! Defines a `Queue<T>` that stores items of type T, called 'plans', sorted by the
//! day on which they are due. Plans due on the same day come out in the order in
//! which they were added. Adding a plan is *O*(log(*n*)) while cancellation is
//! *O*(1).
//!
//! `Simulation` uses this queue to hold vaccination campaigns until the day they
//! are applied.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
};

/// A queue that stores arbitrary data sorted by day
///
/// The day and plan id are stored in a binary heap of `Entry` objects. The data
/// payload is stored in a hash map by plan id. Plan cancellation occurs by
/// removing the corresponding entry from the data hash map; the heap entry is
/// skipped when it reaches the front of the queue.
#[derive(Debug)]
pub struct Queue<T> {
    queue: BinaryHeap<Entry>,
    data_map: HashMap<u64, T>,
    plan_counter: u64,
}

impl<T> Queue<T> {
    /// Create a new empty `Queue<T>`
    #[must_use]
    pub fn new() -> Queue<T> {
        Queue {
            queue: BinaryHeap::new(),
            data_map: HashMap::new(),
            plan_counter: 0,
        }
    }

    /// Add a plan to the queue, due on the specified day
    ///
    /// Returns a `PlanId` for the newly-added plan that can be used to cancel it
    /// if needed.
    pub fn add_plan(&mut self, day: u64, data: T) -> PlanId {
        let id = self.plan_counter;
        self.queue.push(Entry { day, id });
        self.data_map.insert(id, data);
        self.plan_counter += 1;
        PlanId { id }
    }

    /// Cancel a plan that has been added to the queue
    ///
    /// Returns the plan's data, or `None` if the plan has already been
    /// cancelled or retrieved.
    pub fn cancel_plan(&mut self, id: &PlanId) -> Option<T> {
        self.data_map.remove(&id.id)
    }

    /// Retrieve the earliest plan due on or before `day`
    ///
    /// Returns `None` if the queue is empty or the earliest plan is due later.
    pub fn get_next_plan_due(&mut self, day: u64) -> Option<Plan<T>> {
        loop {
            let entry = self.queue.peek()?;
            if !self.data_map.contains_key(&entry.id) {
                // Cancelled
                self.queue.pop();
                continue;
            }
            if entry.day > day {
                return None;
            }
            let entry = self.queue.pop()?;
            let data = self.data_map.remove(&entry.id)?;
            return Some(Plan {
                day: entry.day,
                data,
            });
        }
    }

    /// The day on which the earliest outstanding plan is due
    #[must_use]
    pub fn next_day(&self) -> Option<u64> {
        self.queue
            .iter()
            .filter(|entry| self.data_map.contains_key(&entry.id))
            .map(|entry| entry.day)
            .min()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_map.is_empty()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A day and id object used to order plans in the `Queue<T>`
#[derive(PartialEq, Eq, Debug)]
struct Entry {
    day: u64,
    id: u64,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Entry objects are ordered in increasing order by day and then plan id. The
/// ordering is reversed because `BinaryHeap` is a max-heap.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.day
            .cmp(&other.day)
            .then(self.id.cmp(&other.id))
            .reverse()
    }
}

/// A unique identifier for a plan added to a `Queue<T>`
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PlanId {
    id: u64,
}

/// A plan that holds data of type `T` intended to be used on the specified day
#[derive(Debug)]
pub struct Plan<T> {
    pub day: u64,
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::Queue;

    #[test]
    fn empty_queue() {
        let mut plan_queue = Queue::<()>::new();
        assert!(plan_queue.is_empty());
        assert!(plan_queue.get_next_plan_due(u64::MAX).is_none());
        assert_eq!(plan_queue.next_day(), None);
    }

    #[test]
    fn add_plans() {
        let mut plan_queue = Queue::new();
        plan_queue.add_plan(1, 1);
        plan_queue.add_plan(3, 3);
        plan_queue.add_plan(2, 2);
        assert_eq!(plan_queue.next_day(), Some(1));

        let next_plan = plan_queue.get_next_plan_due(3).unwrap();
        assert_eq!(next_plan.day, 1);
        assert_eq!(next_plan.data, 1);

        let next_plan = plan_queue.get_next_plan_due(3).unwrap();
        assert_eq!(next_plan.day, 2);
        assert_eq!(next_plan.data, 2);

        let next_plan = plan_queue.get_next_plan_due(3).unwrap();
        assert_eq!(next_plan.day, 3);
        assert_eq!(next_plan.data, 3);

        assert!(plan_queue.get_next_plan_due(3).is_none());
        assert!(plan_queue.is_empty());
    }

    #[test]
    fn plans_not_yet_due_stay_queued() {
        let mut plan_queue = Queue::new();
        plan_queue.add_plan(5, "later");
        assert!(plan_queue.get_next_plan_due(4).is_none());
        assert!(!plan_queue.is_empty());
        assert_eq!(plan_queue.get_next_plan_due(5).unwrap().data, "later");
    }

    #[test]
    fn add_plans_on_same_day() {
        let mut plan_queue = Queue::new();
        plan_queue.add_plan(1, 1);
        plan_queue.add_plan(1, 2);

        assert_eq!(plan_queue.get_next_plan_due(1).unwrap().data, 1);
        assert_eq!(plan_queue.get_next_plan_due(1).unwrap().data, 2);
        assert!(plan_queue.get_next_plan_due(1).is_none());
    }

    #[test]
    fn add_and_cancel_plans() {
        let mut plan_queue = Queue::new();
        plan_queue.add_plan(1, 1);
        let plan_to_cancel = plan_queue.add_plan(2, 2);
        plan_queue.add_plan(3, 3);
        assert_eq!(plan_queue.cancel_plan(&plan_to_cancel), Some(2));

        assert_eq!(plan_queue.get_next_plan_due(10).unwrap().data, 1);
        assert_eq!(plan_queue.next_day(), Some(3));
        assert_eq!(plan_queue.get_next_plan_due(10).unwrap().data, 3);
        assert!(plan_queue.get_next_plan_due(10).is_none());
    }

    #[test]
    fn cancel_retrieved_plan() {
        let mut plan_queue = Queue::new();
        let plan_to_cancel = plan_queue.add_plan(1, ());
        plan_queue.get_next_plan_due(1);
        assert_eq!(plan_queue.cancel_plan(&plan_to_cancel), None);
    }
}
