//! Common helpers for translating options into libzmq socket settings.

use lucidity_core::options::SocketOptions;
use std::time::Duration;

/// Milliseconds for a libzmq integer option, saturating at `i32::MAX`.
pub(crate) fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

/// libzmq encodes "block forever" / "linger forever" as -1.
pub(crate) fn optional_millis(duration: Option<Duration>) -> i32 {
    duration.map_or(-1, millis)
}

fn hwm(messages: usize) -> i32 {
    i32::try_from(messages).unwrap_or(i32::MAX)
}

/// Apply topic socket options before bind/connect.
pub(crate) fn apply_socket_options(socket: &zmq::Socket, options: &SocketOptions) -> zmq::Result<()> {
    socket.set_linger(optional_millis(options.linger))?;
    socket.set_sndhwm(hwm(options.send_hwm))?;
    socket.set_rcvhwm(hwm(options.recv_hwm))?;
    socket.set_reconnect_ivl(millis(options.reconnect_ivl))?;
    socket.set_reconnect_ivl_max(millis(options.reconnect_ivl_max))?;
    socket.set_rcvtimeo(optional_millis(options.recv_timeout))?;
    socket.set_sndtimeo(optional_millis(options.send_timeout))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis() {
        assert_eq!(millis(Duration::from_millis(250)), 250);
        assert_eq!(millis(Duration::from_secs(u64::MAX)), i32::MAX);
        assert_eq!(optional_millis(None), -1);
        assert_eq!(optional_millis(Some(Duration::ZERO)), 0);
    }

    #[test]
    fn test_apply_socket_options() {
        let ctx = zmq::Context::new();
        let socket = ctx.socket(zmq::SUB).unwrap();
        let options = SocketOptions::new()
            .with_recv_hwm(42)
            .with_recv_timeout(Duration::from_millis(15));

        apply_socket_options(&socket, &options).unwrap();
        assert_eq!(socket.get_rcvhwm().unwrap(), 42);
        assert_eq!(socket.get_rcvtimeo().unwrap(), 15);
        assert_eq!(socket.get_linger().unwrap(), 1000);
    }
}
