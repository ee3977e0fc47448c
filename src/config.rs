//! Runtime constants and the typed Configuration Source contract.
//!
//! Tunable defaults are collected here so they can be found and adjusted in
//! a single place rather than scattered across modules. The
//! [`SchedulerConfig`]/[`QueueConfig`] types are the typed record an
//! external configuration source (e.g. a JSON file loader) is expected to
//! produce; this crate only deserializes that record, it never reads files.

use serde::Deserialize;

/// Default `max_packets` for a [`crate::traffic_class::TrafficClass`] whose
/// configuration does not specify one.
pub const DEFAULT_MAX_PACKETS: u32 = 100;

/// Default `weight` for a traffic class whose configuration does not specify one.
pub const DEFAULT_WEIGHT: u32 = 0;

/// A scheduler configuration as produced by an external Configuration Source.
///
/// Deserializes from e.g. `{"kind": "DRR", "queues": [...]}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum SchedulerConfig {
    #[serde(rename = "SPQ")]
    Spq { queues: Vec<QueueConfig> },
    #[serde(rename = "DRR")]
    Drr { queues: Vec<QueueConfig> },
}

impl SchedulerConfig {
    /// The queue configs, regardless of which scheduler kind they belong to.
    pub fn queues(&self) -> &[QueueConfig] {
        match self {
            SchedulerConfig::Spq { queues } => queues,
            SchedulerConfig::Drr { queues } => queues,
        }
    }
}

/// One traffic class's configuration.
///
/// `dest_port` is used to synthesise a single `DstPort` filter element for
/// the class; richer filter composition is not expressible through this
/// typed record and must be built programmatically via
/// [`crate::traffic_class::TrafficClass::add_filter`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct QueueConfig {
    pub max_packets: u32,
    pub dest_port: u16,
    pub is_default: bool,
    /// Required when the owning [`SchedulerConfig`] is `Spq`.
    pub priority: Option<u32>,
    /// Required when the owning [`SchedulerConfig`] is `Drr`.
    pub weight: Option<u32>,
}

/// Deserialize a [`SchedulerConfig`] from a JSON string.
///
/// The crate never reads the file itself — the caller (the external
/// Configuration Source) owns file I/O and hands this function the
/// resulting text.
pub fn scheduler_config_from_json(json: &str) -> Result<SchedulerConfig, crate::error::ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Build a ready-to-use scheduler from a typed configuration, validating
/// that every queue carries the field its scheduler kind requires.
///
/// Each [`QueueConfig`] becomes one [`crate::traffic_class::TrafficClass`]
/// with a single synthesised `DstPort` filter (richer filter composition
/// must be built programmatically, not through this record). Queues are
/// registered in configuration order, so that order also decides SPQ
/// tie-breaking and DRR round-robin order.
pub fn build_scheduler(
    config: SchedulerConfig,
    framing: crate::header::Framing,
) -> Result<Box<dyn crate::scheduler::QueueDiscipline>, crate::error::ConfigError> {
    use crate::filter::Filter;
    use crate::filter_element::FilterElement;
    use crate::scheduler::drr::Drr;
    use crate::scheduler::spq::Spq;
    use crate::scheduler::QueueDiscipline;
    use crate::traffic_class::TrafficClass;

    if config.queues().is_empty() {
        return Err(crate::error::ConfigError::NoQueues);
    }

    fn base_class(q: &QueueConfig) -> TrafficClass {
        let mut filter = Filter::new();
        filter.add_element(FilterElement::DstPort(q.dest_port));
        let mut class = TrafficClass::new()
            .with_max_packets(q.max_packets)
            .with_is_default(q.is_default);
        class.add_filter(filter);
        class
    }

    match config {
        SchedulerConfig::Spq { queues } => {
            let mut spq = Spq::new(framing);
            for (index, q) in queues.iter().enumerate() {
                let priority = q
                    .priority
                    .ok_or(crate::error::ConfigError::MissingPriority { index })?;
                spq.register_queue(base_class(q).with_priority_level(priority));
            }
            Ok(Box::new(spq))
        }
        SchedulerConfig::Drr { queues } => {
            let mut drr = Drr::new(framing);
            for (index, q) in queues.iter().enumerate() {
                let weight = q.weight.ok_or(crate::error::ConfigError::MissingWeight { index })?;
                drr.register_queue(base_class(q).with_weight(weight));
            }
            Ok(Box::new(drr))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        assert!(DEFAULT_MAX_PACKETS > 0);
    }

    #[test]
    fn parses_spq_config() {
        let json = r#"{
            "kind": "SPQ",
            "queues": [
                {"max_packets": 50, "dest_port": 100, "is_default": false, "priority": 0},
                {"max_packets": 50, "dest_port": 200, "is_default": true, "priority": 1}
            ]
        }"#;
        let config = scheduler_config_from_json(json).unwrap();
        assert_eq!(config.queues().len(), 2);
        assert!(matches!(config, SchedulerConfig::Spq { .. }));
    }

    #[test]
    fn parses_drr_config_with_weight() {
        let json = r#"{
            "kind": "DRR",
            "queues": [
                {"max_packets": 50, "dest_port": 100, "is_default": true, "weight": 100}
            ]
        }"#;
        let config = scheduler_config_from_json(json).unwrap();
        assert!(matches!(config, SchedulerConfig::Drr { .. }));
        assert_eq!(config.queues()[0].weight, Some(100));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = scheduler_config_from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::Deserialize(_)));
    }

    #[test]
    fn build_scheduler_rejects_empty_queue_list() {
        let config = SchedulerConfig::Spq { queues: vec![] };
        let err = match super::build_scheduler(config, crate::header::Framing::None) {
            Err(e) => e,
            Ok(_) => panic!("expected NoQueues"),
        };
        assert_eq!(err, crate::error::ConfigError::NoQueues);
    }

    #[test]
    fn build_scheduler_rejects_spq_queue_without_priority() {
        let config = SchedulerConfig::Spq {
            queues: vec![QueueConfig {
                max_packets: 10,
                dest_port: 80,
                is_default: true,
                priority: None,
                weight: None,
            }],
        };
        let err = match super::build_scheduler(config, crate::header::Framing::None) {
            Err(e) => e,
            Ok(_) => panic!("expected MissingPriority"),
        };
        assert_eq!(err, crate::error::ConfigError::MissingPriority { index: 0 });
    }

    #[test]
    fn build_scheduler_rejects_drr_queue_without_weight() {
        let config = SchedulerConfig::Drr {
            queues: vec![QueueConfig {
                max_packets: 10,
                dest_port: 80,
                is_default: true,
                priority: None,
                weight: None,
            }],
        };
        let err = match super::build_scheduler(config, crate::header::Framing::None) {
            Err(e) => e,
            Ok(_) => panic!("expected MissingWeight"),
        };
        assert_eq!(err, crate::error::ConfigError::MissingWeight { index: 0 });
    }

    #[test]
    fn build_scheduler_builds_working_spq() {
        let config = SchedulerConfig::Spq {
            queues: vec![
                QueueConfig {
                    max_packets: 10,
                    dest_port: 6000,
                    is_default: false,
                    priority: Some(0),
                    weight: None,
                },
                QueueConfig {
                    max_packets: 10,
                    dest_port: 0,
                    is_default: true,
                    priority: Some(1),
                    weight: None,
                },
            ],
        };
        let mut scheduler = super::build_scheduler(config, crate::header::Framing::None).unwrap();
        let pkt = std::sync::Arc::from(crate::header::build_test_packet(
            std::net::Ipv4Addr::new(10, 0, 0, 1),
            std::net::Ipv4Addr::new(10, 0, 0, 2),
            17,
            1111,
            6000,
            0,
        ));
        assert!(scheduler.enqueue(pkt));
        assert!(scheduler.dequeue().is_some());
    }
}
