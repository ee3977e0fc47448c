//! A pluggable DiffServ egress packet scheduler.
//!
//! Packets are classified into [`traffic_class::TrafficClass`]es on
//! enqueue by a small filter algebra ([`filter_element`], [`filter`]), and
//! a [`scheduler::QueueDiscipline`] decides which class to serve on
//! dequeue. Two disciplines are provided: [`scheduler::spq::Spq`] (Strict
//! Priority Queueing) and [`scheduler::drr::Drr`] (Deficit Round Robin).
//!
//! Schedulers are typically built from a typed [`config::SchedulerConfig`]
//! via [`config::build_scheduler`], but can also be assembled by hand by
//! calling [`scheduler::QueueDiscipline::register_queue`] directly.

pub mod config;
pub mod error;
pub mod filter;
pub mod filter_element;
pub mod header;
pub mod scheduler;
pub mod traffic_class;

pub use config::{build_scheduler, scheduler_config_from_json, QueueConfig, SchedulerConfig};
pub use error::{ConfigError, HeaderParseError};
pub use filter::Filter;
pub use filter_element::FilterElement;
pub use header::{Framing, HeaderView, Packet};
pub use scheduler::drr::Drr;
pub use scheduler::spq::Spq;
pub use scheduler::{DispatchCore, QueueDiscipline, ScheduledPacket};
pub use traffic_class::TrafficClass;
