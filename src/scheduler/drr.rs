//! Deficit Round Robin, per Shreedhar & Varghese (SIGCOMM '95).
//!
//! `schedule` computes entirely against shadow state (`pending_active`,
//! `pending_deficit`) seeded from the canonical `active`/`deficit` on every
//! call, so repeated calls without a commit are idempotent. `commit`
//! promotes shadow to canonical only when `dequeue`/`remove` actually popped
//! a packet.

use crate::header::Framing;
use crate::scheduler::{DispatchCore, QueueDiscipline, ScheduledPacket};
use crate::traffic_class::TrafficClass;

#[derive(Debug, Clone)]
pub struct Drr {
    core: DispatchCore,
    active: usize,
    deficit: Vec<u64>,
    pending_active: usize,
    pending_deficit: Vec<u64>,
}

impl Drr {
    pub fn new(framing: Framing) -> Self {
        Self {
            core: DispatchCore::new(framing),
            active: 0,
            deficit: Vec::new(),
            pending_active: 0,
            pending_deficit: Vec::new(),
        }
    }

    /// Canonical deficit counters, one per class.
    pub fn deficit(&self) -> &[u64] {
        &self.deficit
    }

    pub fn active(&self) -> usize {
        self.active
    }
}

impl QueueDiscipline for Drr {
    fn core(&self) -> &DispatchCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DispatchCore {
        &mut self.core
    }

    fn register_queue(&mut self, class: TrafficClass) {
        self.core.push_class(class);
        self.deficit.push(0);
        self.pending_deficit.push(0);
    }

    fn schedule(&mut self) -> Option<ScheduledPacket> {
        let n = self.core.classes().len();
        if n == 0 {
            return None;
        }
        self.pending_active = self.active;
        self.pending_deficit = self.deficit.clone();

        if self.core.classes().iter().all(TrafficClass::is_empty) {
            return None;
        }

        // Bound the scan by O(n * H): H is the largest observed head-packet
        // size divided by the smallest positive weight in play. A class
        // that never carries a positive weight can never clear a nonzero
        // deficit requirement, so it contributes at most one wasted visit.
        let max_head = self
            .core
            .classes()
            .iter()
            .filter_map(|c| c.peek().map(|p| p.len() as u64))
            .max()
            .unwrap_or(0);
        let min_positive_weight = self
            .core
            .classes()
            .iter()
            .map(|c| c.weight() as u64)
            .filter(|&w| w > 0)
            .min();
        let max_laps = match min_positive_weight {
            Some(w) => (max_head / w) + 2,
            None => 1,
        };
        let max_iters = n as u64 * max_laps;

        for _ in 0..max_iters {
            let idx = self.pending_active;
            let class = &self.core.classes()[idx];
            if !class.is_empty() {
                self.pending_deficit[idx] = self.pending_deficit[idx].saturating_add(class.weight() as u64);
                if let Some(head) = class.peek() {
                    let size = head.len() as u64;
                    if size <= self.pending_deficit[idx] {
                        self.pending_deficit[idx] -= size;
                        let packet = head.clone();
                        tracing::debug!(class_index = idx, deficit = self.pending_deficit[idx], "DRR scheduled class");
                        return Some(ScheduledPacket {
                            class_index: idx,
                            packet,
                        });
                    }
                }
            }
            self.pending_active = (self.pending_active + 1) % n;
        }
        None
    }

    fn commit(&mut self, _scheduled: &ScheduledPacket) {
        self.active = self.pending_active;
        self.deficit = self.pending_deficit.clone();
    }
}
