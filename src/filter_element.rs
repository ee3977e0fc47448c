//! Atomic predicates over a [`HeaderView`].
//!
//! A `FilterElement` never parses packet bytes itself — it is handed an
//! already-produced `HeaderView` and evaluates a pure function of that view
//! plus its own parameters. Masked-address variants normalise their network
//! address against the mask at construction time, so a later `matches` call
//! is a plain equality check.

use std::net::Ipv4Addr;

use crate::header::HeaderView;

/// One atomic match predicate, per the classifier algebra's variant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterElement {
    SrcAddr(Ipv4Addr),
    DstAddr(Ipv4Addr),
    /// `(addr & mask) == (net & mask)`. `net` is normalised against `mask`
    /// at construction so callers may pass either a host or network address.
    SrcMask { mask: Ipv4Addr, net: Ipv4Addr },
    DstMask { mask: Ipv4Addr, net: Ipv4Addr },
    /// Matches only when the view's corresponding L4 port field is populated.
    SrcPort(u16),
    DstPort(u16),
    Proto(u8),
}

impl FilterElement {
    /// Construct a masked source-address element, normalising `net` against `mask`.
    pub fn src_mask(mask: Ipv4Addr, net: Ipv4Addr) -> Self {
        FilterElement::SrcMask {
            mask,
            net: apply_mask(net, mask),
        }
    }

    /// Construct a masked destination-address element, normalising `net` against `mask`.
    pub fn dst_mask(mask: Ipv4Addr, net: Ipv4Addr) -> Self {
        FilterElement::DstMask {
            mask,
            net: apply_mask(net, mask),
        }
    }

    /// Evaluate this predicate against an already-parsed header view.
    pub fn matches(&self, view: &HeaderView) -> bool {
        match *self {
            FilterElement::SrcAddr(addr) => view.src_ip == addr,
            FilterElement::DstAddr(addr) => view.dst_ip == addr,
            FilterElement::SrcMask { mask, net } => apply_mask(view.src_ip, mask) == net,
            FilterElement::DstMask { mask, net } => apply_mask(view.dst_ip, mask) == net,
            FilterElement::SrcPort(port) => view.src_port == Some(port),
            FilterElement::DstPort(port) => view.dst_port == Some(port),
            FilterElement::Proto(proto) => view.proto == proto,
        }
    }
}

fn apply_mask(addr: Ipv4Addr, mask: Ipv4Addr) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(addr) & u32::from(mask))
}
