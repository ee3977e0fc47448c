//! Conjunction of [`FilterElement`]s.
//!
//! A `Filter` matches a packet iff every element it holds matches, in
//! insertion order, short-circuiting on the first failure. An empty filter
//! matches trivially.

use crate::filter_element::FilterElement;
use crate::header::HeaderView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    elements: Vec<FilterElement>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter element. Append-only, as filters are built at
    /// configuration time and never mutated once a scheduler is running.
    pub fn add_element(&mut self, element: FilterElement) -> &mut Self {
        self.elements.push(element);
        self
    }

    pub fn elements(&self) -> &[FilterElement] {
        &self.elements
    }

    /// True iff every element matches, or the filter is empty.
    pub fn matches(&self, view: &HeaderView) -> bool {
        self.elements.iter().all(|e| e.matches(view))
    }
}

impl FromIterator<FilterElement> for Filter {
    fn from_iter<I: IntoIterator<Item = FilterElement>>(iter: I) -> Self {
        Filter {
            elements: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn view(proto: u8, dst_port: Option<u16>) -> HeaderView {
        HeaderView {
            dst_ip: Ipv4Addr::UNSPECIFIED,
            src_ip: Ipv4Addr::UNSPECIFIED,
            proto,
            src_port: None,
            dst_port,
        }
    }

    #[test]
    fn empty_filter_matches_trivially() {
        let filter = Filter::new();
        assert!(filter.matches(&view(0, None)));
    }

    #[test]
    fn conjunction_requires_all_elements() {
        let filter: Filter = [FilterElement::Proto(6), FilterElement::DstPort(443)]
            .into_iter()
            .collect();
        assert!(filter.matches(&view(6, Some(443))));
        assert!(!filter.matches(&view(6, Some(80))));
        assert!(!filter.matches(&view(17, Some(443))));
    }

    #[test]
    fn short_circuits_on_first_false() {
        // A port element with no L4 data populated must fail without panicking
        // on later elements.
        let mut filter = Filter::new();
        filter.add_element(FilterElement::DstPort(1));
        filter.add_element(FilterElement::Proto(200));
        assert!(!filter.matches(&view(1, None)));
    }
}
