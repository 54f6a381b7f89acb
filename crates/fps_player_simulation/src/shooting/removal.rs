//! Deadline queue для отложенного удаления projectiles
//!
//! Каждый выстрел кладёт запись `(deadline, seq, id)`. Loop опрашивает очередь
//! каждый шаг и забирает всё, у чего `deadline <= now`.
//! Отмены нет: запись всегда доживает до своего deadline.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::host::ProjectileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PendingRemoval {
    deadline: Duration,
    /// FIFO среди одинаковых deadline
    seq: u64,
    projectile: ProjectileId,
}

/// Min-heap по deadline
#[derive(Debug, Clone, Default)]
pub struct RemovalQueue {
    heap: BinaryHeap<Reverse<PendingRemoval>>,
    next_seq: u64,
}

impl RemovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, projectile: ProjectileId, deadline: Duration) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);

        self.heap.push(Reverse(PendingRemoval {
            deadline,
            seq,
            projectile,
        }));
    }

    /// Забирает все истёкшие записи в порядке deadline
    pub fn pop_expired(&mut self, now: Duration) -> Vec<ProjectileId> {
        let mut expired = Vec::new();

        while let Some(Reverse(next)) = self.heap.peek() {
            if next.deadline > now {
                break;
            }
            expired.push(next.projectile);
            self.heap.pop();
        }

        expired
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_not_expired_before_deadline() {
        let mut queue = RemovalQueue::new();
        queue.schedule(ProjectileId(1), secs(5.0));

        assert!(queue.pop_expired(secs(4.999)).is_empty());
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.pop_expired(secs(5.0)), vec![ProjectileId(1)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_expired_in_deadline_order() {
        let mut queue = RemovalQueue::new();
        queue.schedule(ProjectileId(3), secs(7.0));
        queue.schedule(ProjectileId(1), secs(5.0));
        queue.schedule(ProjectileId(2), secs(6.0));

        assert_eq!(queue.next_deadline(), Some(secs(5.0)));
        assert_eq!(
            queue.pop_expired(secs(10.0)),
            vec![ProjectileId(1), ProjectileId(2), ProjectileId(3)]
        );
    }

    #[test]
    fn test_equal_deadlines_fifo() {
        let mut queue = RemovalQueue::new();
        queue.schedule(ProjectileId(9), secs(5.0));
        queue.schedule(ProjectileId(4), secs(5.0));

        assert_eq!(
            queue.pop_expired(secs(5.0)),
            vec![ProjectileId(9), ProjectileId(4)]
        );
    }
}
