/* src/net/resolve.rs */

use crate::error::BundleError;
use log::debug;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

/// Public resolver used as the routing target when nothing else is configured.
pub const DEFAULT_PROBE: &str = "8.8.8.8:80";

/// Asks the routing table which local address it would use to reach `probe`.
///
/// A UDP `connect` needs no handshake, so nothing is transmitted: the kernel
/// only picks a source address for the socket, which is read back here.
/// Interfaces are never enumerated, so inactive virtual adapters are ignored
/// and the route the OS prefers wins.
pub fn resolve_outbound_address(probe: SocketAddr) -> Result<IpAddr, BundleError> {
    let unspecified = match probe {
        SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
        SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
    };

    let socket = UdpSocket::bind(unspecified).map_err(BundleError::Resolution)?;
    socket.connect(probe).map_err(BundleError::Resolution)?;

    let address = local_address_of(&socket)?;
    debug!("> Route towards {} leaves through {}", probe, address);
    Ok(address)
}

// An unspecified address means the socket was never routed.
fn local_address_of(socket: &UdpSocket) -> Result<IpAddr, BundleError> {
    let local = socket.local_addr().map_err(BundleError::Resolution)?;
    if local.ip().is_unspecified() {
        return Err(BundleError::Resolution(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            "no local interface was selected for the probe route",
        )));
    }
    Ok(local.ip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_probe_resolves_to_loopback() {
        let probe: SocketAddr = "127.0.0.1:9".parse().unwrap();
        let address = resolve_outbound_address(probe).unwrap();
        assert_eq!(address, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn resolved_address_round_trips_through_text() {
        let probe: SocketAddr = "127.0.0.1:53".parse().unwrap();
        let address = resolve_outbound_address(probe).unwrap();
        let reparsed: IpAddr = address.to_string().parse().unwrap();
        assert_eq!(reparsed, address);
    }

    #[test]
    fn unrouted_socket_is_a_resolution_error() {
        let socket = UdpSocket::bind("0.0.0.0:0").unwrap();
        match local_address_of(&socket) {
            Err(BundleError::Resolution(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::AddrNotAvailable)
            }
            other => panic!("expected a resolution error, got {:?}", other),
        }
    }

    // Linux refuses to route a broadcast destination without SO_BROADCAST.
    #[cfg(target_os = "linux")]
    #[test]
    fn refused_route_is_a_resolution_error() {
        let probe: SocketAddr = "255.255.255.255:80".parse().unwrap();
        match resolve_outbound_address(probe) {
            Err(BundleError::Resolution(_)) => {}
            other => panic!("expected a resolution error, got {:?}", other),
        }
    }

    #[test]
    fn default_probe_is_a_socket_address() {
        assert!(DEFAULT_PROBE.parse::<SocketAddr>().is_ok());
    }
}
