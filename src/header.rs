//! Packet handle and the Header Parser collaborator.
//!
//! [`parse_header`] strips a declared link-layer [`Framing`], parses the
//! IPv4 fixed header, and — when `proto` is TCP (6) or UDP (17) — the
//! 4-byte-aligned L4 port prefix. It never mutates its input and performs
//! no allocation beyond the returned [`HeaderView`] itself.

use std::net::Ipv4Addr;

use crate::error::HeaderParseError;

/// Opaque packet handle exchanged with the host runtime.
///
/// Reference-counted so enqueue/dequeue/peek can cheaply clone the handle
/// without copying the underlying bytes, matching the "packet handles...
/// may be copied cheaply when the runtime's packet type is reference-counted"
/// note in the scheduler's concurrency model.
pub type Packet = std::sync::Arc<[u8]>;

/// Link-layer framing a packet buffer is expected to carry before the IPv4
/// header. The ns-3 source this design is drawn from always strips a fixed
/// 2-byte PPP header; this crate treats the framing length as configurable
/// so the Header Parser collaborator stays decoupled from any one link type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// No link-layer header to strip; the buffer starts at the IPv4 header.
    None,
    /// A fixed-size link header of `header_len` bytes precedes the IPv4 header.
    Ppp { header_len: usize },
}

/// Read-only projection of a packet's IPv4 + L4 fields.
///
/// Port fields are populated only when `proto` is 6 (TCP) or 17 (UDP).
/// All numeric fields are host-byte-order in this view, regardless of how
/// they were encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderView {
    pub dst_ip: Ipv4Addr,
    pub src_ip: Ipv4Addr,
    pub proto: u8,
    pub src_port: Option<u16>,
    pub dst_port: Option<u16>,
}

const TCP_PROTO: u8 = 6;
const UDP_PROTO: u8 = 17;
const IPV4_FIXED_HEADER_LEN: usize = 20;

/// Parse a [`HeaderView`] out of `bytes`, stripping `framing` first.
///
/// Returns `Err` on any short buffer rather than panicking; callers (in
/// practice, [`crate::filter_element::FilterElement::matches`]) treat any
/// error as "this element does not match" and never propagate it further.
pub fn parse_header(bytes: &[u8], framing: Framing) -> Result<HeaderView, HeaderParseError> {
    let ip_bytes = strip_framing(bytes, framing)?;
    if ip_bytes.len() < IPV4_FIXED_HEADER_LEN {
        return Err(HeaderParseError::IpHeaderMissing);
    }

    let ihl = (ip_bytes[0] & 0x0f) as usize * 4;
    let ihl = ihl.max(IPV4_FIXED_HEADER_LEN);
    let proto = ip_bytes[9];
    let src_ip = Ipv4Addr::new(ip_bytes[12], ip_bytes[13], ip_bytes[14], ip_bytes[15]);
    let dst_ip = Ipv4Addr::new(ip_bytes[16], ip_bytes[17], ip_bytes[18], ip_bytes[19]);

    let (src_port, dst_port) = if proto == TCP_PROTO || proto == UDP_PROTO {
        let l4 = ip_bytes
            .get(ihl..ihl + 4)
            .ok_or(HeaderParseError::L4HeaderMissing)?;
        let src_port = u16::from_be_bytes([l4[0], l4[1]]);
        let dst_port = u16::from_be_bytes([l4[2], l4[3]]);
        (Some(src_port), Some(dst_port))
    } else {
        (None, None)
    };

    Ok(HeaderView {
        dst_ip,
        src_ip,
        proto,
        src_port,
        dst_port,
    })
}

fn strip_framing(bytes: &[u8], framing: Framing) -> Result<&[u8], HeaderParseError> {
    match framing {
        Framing::None => Ok(bytes),
        Framing::Ppp { header_len } => bytes.get(header_len..).ok_or(HeaderParseError::FramingMissing),
    }
}

/// Build a minimal IPv4 + TCP/UDP packet buffer, for tests and the
/// demonstration binary. Not part of the Header Parser contract itself —
/// the host runtime owns real packet construction.
pub fn build_test_packet(
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    proto: u8,
    src_port: u16,
    dst_port: u16,
    payload_len: usize,
) -> Vec<u8> {
    let mut buf = vec![0u8; IPV4_FIXED_HEADER_LEN];
    buf[0] = 0x45; // version 4, IHL 5
    buf[9] = proto;
    buf[12..16].copy_from_slice(&src_ip.octets());
    buf[16..20].copy_from_slice(&dst_ip.octets());
    if proto == TCP_PROTO || proto == UDP_PROTO {
        buf.extend_from_slice(&src_port.to_be_bytes());
        buf.extend_from_slice(&dst_port.to_be_bytes());
    }
    buf.extend(std::iter::repeat(0u8).take(payload_len));
    buf
}
