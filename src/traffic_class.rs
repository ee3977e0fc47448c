//! Bounded FIFO plus the predicate(s) that select which packets enter it.
//!
//! Matching across a class's filter list is OR: the class matches iff any
//! filter matches, or the filter list is empty (wildcard class). Matching
//! within one filter is AND (see [`crate::filter::Filter`]).

use std::collections::VecDeque;

use crate::config::{DEFAULT_MAX_PACKETS, DEFAULT_WEIGHT};
use crate::filter::Filter;
use crate::header::{HeaderView, Packet};

#[derive(Debug, Clone)]
pub struct TrafficClass {
    queue: VecDeque<Packet>,
    max_packets: u32,
    weight: u32,
    priority_level: u32,
    is_default: bool,
    filters: Vec<Filter>,
}

impl Default for TrafficClass {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            max_packets: DEFAULT_MAX_PACKETS,
            weight: DEFAULT_WEIGHT,
            priority_level: 0,
            is_default: false,
            filters: Vec::new(),
        }
    }
}

impl TrafficClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_packets(mut self, max_packets: u32) -> Self {
        self.max_packets = max_packets;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_priority_level(mut self, priority_level: u32) -> Self {
        self.priority_level = priority_level;
        self
    }

    pub fn with_is_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn add_filter(&mut self, filter: Filter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    pub fn max_packets(&self) -> u32 {
        self.max_packets
    }

    pub fn packet_count(&self) -> u32 {
        self.queue.len() as u32
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn priority_level(&self) -> u32 {
        self.priority_level
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Append `pkt` if there is room. Returns `false` (drop-tail) on overflow
    /// without evicting any existing packet.
    pub fn enqueue(&mut self, pkt: Packet) -> bool {
        if self.packet_count() >= self.max_packets {
            return false;
        }
        self.queue.push_back(pkt);
        true
    }

    /// Pop the head packet, or `None` if empty.
    pub fn dequeue(&mut self) -> Option<Packet> {
        self.queue.pop_front()
    }

    /// Identical pop semantics to [`Self::dequeue`]; kept distinct so a
    /// caller can attach different observability hooks to each path without
    /// the queue-discipline contract itself changing.
    pub fn remove(&mut self) -> Option<Packet> {
        self.queue.pop_front()
    }

    /// Read-only borrow of the head packet.
    pub fn peek(&self) -> Option<&Packet> {
        self.queue.front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// True iff any filter matches `view`, or the class carries no filters
    /// (wildcard).
    pub fn matches(&self, view: &HeaderView) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|f| f.matches(view))
    }
}
