//! Strict Priority Queueing.
//!
//! `schedule` always picks the non-empty class with the smallest
//! `priority_level`, ties broken by lowest index. No state is carried
//! between calls, so higher-priority traffic can starve lower-priority
//! classes indefinitely — that is accepted by design, not a bug.

use crate::header::Framing;
use crate::scheduler::{DispatchCore, QueueDiscipline, ScheduledPacket};

#[derive(Debug, Clone)]
pub struct Spq {
    core: DispatchCore,
}

impl Spq {
    pub fn new(framing: Framing) -> Self {
        Self {
            core: DispatchCore::new(framing),
        }
    }
}

impl QueueDiscipline for Spq {
    fn core(&self) -> &DispatchCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DispatchCore {
        &mut self.core
    }

    fn schedule(&mut self) -> Option<ScheduledPacket> {
        let classes = self.core.classes();
        let mut best: Option<usize> = None;
        for (idx, class) in classes.iter().enumerate() {
            if class.is_empty() {
                continue;
            }
            match best {
                None => best = Some(idx),
                Some(current_best) if class.priority_level() < classes[current_best].priority_level() => {
                    best = Some(idx);
                }
                _ => {}
            }
        }
        let idx = best?;
        let packet = classes[idx].peek()?.clone();
        tracing::debug!(class_index = idx, "SPQ scheduled class");
        Some(ScheduledPacket {
            class_index: idx,
            packet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::filter_element::FilterElement;
    use crate::header::build_test_packet;
    use crate::traffic_class::TrafficClass;
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    fn make_spq() -> Spq {
        let mut spq = Spq::new(Framing::None);
        // class 0: high priority, matches dst_port 6000
        let mut class0 = TrafficClass::new().with_priority_level(0);
        let mut f0 = Filter::new();
        f0.add_element(FilterElement::DstPort(6000));
        class0.add_filter(f0);
        spq.register_queue(class0);

        // class 1: low priority, default
        let class1 = TrafficClass::new().with_priority_level(1).with_is_default(true);
        spq.register_queue(class1);
        spq
    }

    fn udp_packet(dst_port: u16) -> Arc<[u8]> {
        Arc::from(build_test_packet(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            17,
            1111,
            dst_port,
            0,
        ))
    }

    #[test]
    fn priority_wins_over_arrival_order() {
        // Two classes at priorities 0 and 1; packet A arrives first and
        // lands in the low-priority default class, packet B arrives second
        // and matches the high-priority filtered class. B must dequeue first.
        let mut spq = make_spq();
        assert!(spq.enqueue(udp_packet(9999))); // A -> default class 1
        assert!(spq.enqueue(udp_packet(6000))); // B -> class 0

        let first = spq.dequeue();
        let second = spq.dequeue();
        let third = spq.dequeue();

        assert_eq!(first, Some(udp_packet(6000)));
        assert_eq!(second, Some(udp_packet(9999)));
        assert_eq!(third, None);
    }

    #[test]
    fn ties_broken_by_lowest_index() {
        let mut spq = Spq::new(Framing::None);
        spq.register_queue(TrafficClass::new().with_priority_level(5));
        spq.register_queue(TrafficClass::new().with_priority_level(5));
        spq.enqueue(udp_packet(1)); // goes to class 0 (wildcard, first match)
        let scheduled = spq.schedule().unwrap();
        assert_eq!(scheduled.class_index, 0);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut spq = make_spq();
        spq.enqueue(udp_packet(6000));
        let peeked = spq.peek();
        assert!(peeked.is_some());
        let dequeued = spq.dequeue();
        assert_eq!(peeked, dequeued);
    }

    #[test]
    fn empty_scheduler_returns_none() {
        let mut spq = make_spq();
        assert_eq!(spq.dequeue(), None);
    }
}
