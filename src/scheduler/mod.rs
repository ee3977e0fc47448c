//! The DiffServ dispatch layer: classify-on-enqueue, schedule-on-dequeue.
//!
//! [`DispatchCore`] is the shared state every scheduler variant is built
//! over — it exclusively owns the `Vec<TrafficClass>` and implements
//! classification. [`QueueDiscipline`] is the trait a scheduler variant
//! implements; its default methods provide the queue-discipline contract
//! (`enqueue`/`dequeue`/`remove`/`peek`/`register_queue`) in terms of one
//! abstract `schedule` method, a single extension point instead of a
//! virtual-inheritance hierarchy.

pub mod drr;
pub mod spq;

use crate::header::{parse_header, Framing, HeaderView, Packet};
use crate::traffic_class::TrafficClass;

/// The result of a `schedule` peek: which class would be served and a cheap
/// clone of its head packet. Carrying the class index alongside the packet
/// is what lets `dequeue` pop from the exact class `schedule` chose instead
/// of reclassifying (the "classify-on-dequeue parity" requirement).
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPacket {
    pub class_index: usize,
    pub packet: Packet,
}

/// Shared state owned by every scheduler variant: the ordered traffic
/// classes and the framing used to parse enqueued packets.
#[derive(Debug, Clone)]
pub struct DispatchCore {
    classes: Vec<TrafficClass>,
    framing: Framing,
}

impl DispatchCore {
    pub fn new(framing: Framing) -> Self {
        Self {
            classes: Vec::new(),
            framing,
        }
    }

    pub fn classes(&self) -> &[TrafficClass] {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut [TrafficClass] {
        &mut self.classes
    }

    pub fn push_class(&mut self, class: TrafficClass) {
        self.classes.push(class);
    }

    /// Walk classes in order: the lowest-index matching class wins. If none
    /// match, the lowest-index class with `is_default = true` wins. A header
    /// that fails to parse cannot be tested against any concrete
    /// `FilterElement`, so only wildcard classes (no filters at all) remain
    /// eligible before falling back to the default class.
    pub fn classify(&self, parsed: &Result<HeaderView, crate::error::HeaderParseError>) -> Option<usize> {
        match parsed {
            Ok(view) => {
                if let Some(idx) = self.classes.iter().position(|c| c.matches(view)) {
                    return Some(idx);
                }
            }
            Err(_) => {
                if let Some(idx) = self.classes.iter().position(|c| c.filters().is_empty()) {
                    return Some(idx);
                }
            }
        }
        self.classes.iter().position(TrafficClass::is_default)
    }

    /// Classify and admit `pkt`. `false` if classification fails or the
    /// target class's FIFO is full.
    pub fn enqueue(&mut self, pkt: Packet) -> bool {
        let parsed = parse_header(&pkt, self.framing);
        match self.classify(&parsed) {
            Some(idx) => self.classes[idx].enqueue(pkt),
            None => false,
        }
    }
}

/// A queue discipline: the contract the host device driver invokes.
///
/// Implementors provide `schedule` (the peek-only scheduling decision) and
/// storage for a [`DispatchCore`]; the remaining methods are provided so
/// that every variant shares one `enqueue`/`dequeue`/`remove`/`peek`
/// implementation built on top of it.
pub trait QueueDiscipline {
    fn core(&self) -> &DispatchCore;
    fn core_mut(&mut self) -> &mut DispatchCore;

    /// Peek: identify the next packet to send and the class it would come
    /// from, without mutating canonical scheduler state. Calling this
    /// repeatedly without an intervening `commit` must return the same
    /// result.
    fn schedule(&mut self) -> Option<ScheduledPacket>;

    /// Promote shadow scheduling state to canonical. Called only when a
    /// `dequeue`/`remove` actually popped a packet. The default is a no-op,
    /// which is correct for schedulers that carry no shadow state (e.g.
    /// SPQ).
    fn commit(&mut self, _scheduled: &ScheduledPacket) {}

    /// Append a traffic class and let the scheduler variant extend any
    /// per-class state it keeps (e.g. DRR's zeroed deficit counter).
    fn register_queue(&mut self, class: TrafficClass) {
        self.core_mut().push_class(class);
    }

    fn enqueue(&mut self, pkt: Packet) -> bool {
        self.core_mut().enqueue(pkt)
    }

    fn dequeue(&mut self) -> Option<Packet> {
        let scheduled = self.schedule()?;
        let popped = self.core_mut().classes_mut()[scheduled.class_index].dequeue();
        if popped.is_some() {
            self.commit(&scheduled);
        }
        popped
    }

    /// Semantically identical to `dequeue`; kept as a separate entry point
    /// so a caller can attach different observability hooks to each path.
    fn remove(&mut self) -> Option<Packet> {
        let scheduled = self.schedule()?;
        let popped = self.core_mut().classes_mut()[scheduled.class_index].remove();
        if popped.is_some() {
            self.commit(&scheduled);
        }
        popped
    }

    fn peek(&mut self) -> Option<Packet> {
        self.schedule().map(|s| s.packet)
    }
}
