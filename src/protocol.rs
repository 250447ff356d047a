//! Link handshake protocol
//!
//! The bridge firmware is a strict single-outstanding-command state machine
//! with no buffering: every command/response pair is synchronous and must be
//! read in full before the next command is issued. The protocol layer is
//! therefore a state machine over one-byte requests and one-byte responses,
//! with exactly one long-payload command (frame transmission).
//!
//! ## Wire protocol
//!
//! | Direction   | Byte(s)           | Meaning                  |
//! |-------------|-------------------|--------------------------|
//! | device→host | `'r'`             | device ready after reset |
//! | host→device | `'r'`             | begin frame transmission |
//! | host→device | 320,784 raw bytes | packed frame             |
//! | device→host | `'r'`             | frame accepted           |
//! | host→device | `'s'`             | enter sleep              |
//! | device→host | `'s'`             | sleep confirmed          |
//!
//! Any deviation from this byte sequence is a protocol error. Protocol
//! errors are fatal: the transport is closed before the error surfaces, and
//! nothing is retried.
//!
//! ## Example
//!
//! ```no_run
//! use epd1304::{Link, SerialTransport};
//!
//! # fn main() -> Result<(), epd1304::Error<SerialTransport>> {
//! let transport = SerialTransport::open("/dev/ttyACM0").map_err(epd1304::Error::Transport)?;
//! let mut link = Link::open(transport)?;
//! link.transmit(&[0u8; 320_784])?;
//! link.close()?;
//! # Ok(())
//! # }
//! ```

use log::{debug, trace, warn};

use crate::error::Error;
use crate::transport::Transport;

/// Byte the device sends once ready after reset; also the host's
/// begin-transmission command and the device's frame acknowledgment
pub const READY: u8 = b'r';

/// Byte the host sends to request sleep; echoed by the device once the
/// panel has entered sleep mode
pub const SLEEP: u8 = b's';

type ProtocolResult<T> = core::result::Result<(), Error<T>>;

/// Link lifecycle state
///
/// Transitions: `Closed → Awake → (Transmitting → Awake)* → Closed`.
/// `Awake` is entered only after a successful wake acknowledgment; `Closed`
/// after a successful sleep acknowledgment or on any protocol failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LinkState {
    /// No transport held open
    Closed,
    /// Wake acknowledged; the device is waiting for a command
    Awake,
    /// A frame is in flight, its acknowledgment not yet read
    Transmitting,
}

/// The request/acknowledge state machine over a byte transport
///
/// Owns the transport exclusively for its whole lifetime. Every protocol
/// failure closes the transport before the error is returned, so a `Link`
/// never outlives its device handle in an open state.
pub struct Link<T: Transport> {
    /// The exclusively-owned transport
    transport: T,
    /// Current lifecycle state
    state: LinkState,
}

impl<T: Transport> Link<T> {
    /// Wake the link: `Closed → Awake`
    ///
    /// Blocks until the device reports ready after its reset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LinkInit`] if the device answers with anything but
    /// the ready byte, or [`Error::Transport`] on an I/O failure. The
    /// transport is closed before either error is returned.
    pub fn open(mut transport: T) -> Result<Self, Error<T>> {
        match transport.read_byte() {
            Ok(READY) => {
                debug!("link ready");
                Ok(Self {
                    transport,
                    state: LinkState::Awake,
                })
            }
            Ok(response) => {
                close_best_effort(&mut transport);
                Err(Error::LinkInit { response })
            }
            Err(e) => {
                close_best_effort(&mut transport);
                Err(Error::Transport(e))
            }
        }
    }

    /// Transmit a packed frame and wait for its acknowledgment
    ///
    /// Blocks until the panel has finished displaying the frame. On success
    /// the link returns to `Awake` and further frames may be sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameNotAcknowledged`] if the device answers with
    /// anything but the acknowledgment byte, or [`Error::Transport`] on an
    /// I/O failure. The transport is closed before either error is returned.
    pub fn transmit(&mut self, packed: &[u8]) -> ProtocolResult<T> {
        self.state = LinkState::Transmitting;
        trace!("transmitting {} byte frame", packed.len());
        if let Err(e) = self
            .transport
            .write_bytes(&[READY])
            .and_then(|()| self.transport.write_bytes(packed))
        {
            self.fail();
            return Err(Error::Transport(e));
        }
        match self.transport.read_byte() {
            Ok(READY) => {
                debug!("frame acknowledged");
                self.state = LinkState::Awake;
                Ok(())
            }
            Ok(response) => {
                self.fail();
                Err(Error::FrameNotAcknowledged { response })
            }
            Err(e) => {
                self.fail();
                Err(Error::Transport(e))
            }
        }
    }

    /// Put the display to sleep and release the transport: `Awake → Closed`
    ///
    /// The transport is closed in all cases, success or failure, before this
    /// returns. Closing an already-closed link is a no-op, which lets owners
    /// call it unconditionally on their exit paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SleepNotAcknowledged`] if the device answers with
    /// anything but the sleep confirmation, or [`Error::Transport`] on an
    /// I/O failure. When both the handshake and the release fail, the
    /// handshake error wins.
    pub fn close(&mut self) -> ProtocolResult<T> {
        if self.state == LinkState::Closed {
            return Ok(());
        }
        let outcome = self.sleep_handshake();
        self.state = LinkState::Closed;
        match self.transport.close() {
            Ok(()) => outcome,
            Err(e) => outcome.and(Err(Error::Transport(e))),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LinkState {
        self.state
    }

    fn sleep_handshake(&mut self) -> ProtocolResult<T> {
        self.transport
            .write_bytes(&[SLEEP])
            .map_err(Error::Transport)?;
        match self.transport.read_byte() {
            Ok(SLEEP) => {
                debug!("display sleeping");
                Ok(())
            }
            Ok(response) => Err(Error::SleepNotAcknowledged { response }),
            Err(e) => Err(Error::Transport(e)),
        }
    }

    /// Release the transport after a protocol failure
    fn fail(&mut self) {
        close_best_effort(&mut self.transport);
        self.state = LinkState::Closed;
    }
}

fn close_best_effort<T: Transport>(transport: &mut T) {
    if let Err(e) = transport.close() {
        warn!("transport close failed: {e:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum MockError {
        Exhausted,
    }

    #[derive(Default, Debug)]
    struct MockState {
        reads: VecDeque<u8>,
        writes: Vec<Vec<u8>>,
        closes: usize,
    }

    #[derive(Debug)]
    struct MockTransport {
        state: Rc<RefCell<MockState>>,
    }

    impl Transport for MockTransport {
        type Error = MockError;

        fn read_byte(&mut self) -> Result<u8, Self::Error> {
            self.state
                .borrow_mut()
                .reads
                .pop_front()
                .ok_or(MockError::Exhausted)
        }

        fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            self.state.borrow_mut().writes.push(bytes.to_vec());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Self::Error> {
            self.state.borrow_mut().closes += 1;
            Ok(())
        }
    }

    fn mock(reads: &[u8]) -> (MockTransport, Rc<RefCell<MockState>>) {
        let state = Rc::new(RefCell::new(MockState {
            reads: reads.iter().copied().collect(),
            ..MockState::default()
        }));
        (
            MockTransport {
                state: Rc::clone(&state),
            },
            state,
        )
    }

    #[test]
    fn test_open_happy_path() {
        let (transport, state) = mock(b"r");
        let link = Link::open(transport).unwrap();
        assert_eq!(link.state(), LinkState::Awake);
        assert_eq!(state.borrow().closes, 0);
    }

    #[test]
    fn test_open_wrong_byte_closes_transport() {
        let (transport, state) = mock(b"x");
        let result = Link::open(transport);
        assert!(matches!(result, Err(Error::LinkInit { response: b'x' })));
        assert_eq!(state.borrow().closes, 1);
    }

    #[test]
    fn test_open_read_error_closes_transport() {
        let (transport, state) = mock(b"");
        let result = Link::open(transport);
        assert!(matches!(
            result,
            Err(Error::Transport(MockError::Exhausted))
        ));
        assert_eq!(state.borrow().closes, 1);
    }

    #[test]
    fn test_transmit_happy_path() {
        let (transport, state) = mock(b"rr");
        let mut link = Link::open(transport).unwrap();
        link.transmit(&[1, 2, 3]).unwrap();
        assert_eq!(link.state(), LinkState::Awake);
        let state = state.borrow();
        assert_eq!(state.writes, vec![vec![b'r'], vec![1, 2, 3]]);
        assert_eq!(state.closes, 0);
    }

    #[test]
    fn test_transmit_bad_ack_closes_transport() {
        let (transport, state) = mock(b"rx");
        let mut link = Link::open(transport).unwrap();
        let result = link.transmit(&[1, 2, 3]);
        assert!(matches!(
            result,
            Err(Error::FrameNotAcknowledged { response: b'x' })
        ));
        assert_eq!(link.state(), LinkState::Closed);
        assert_eq!(state.borrow().closes, 1);
    }

    #[test]
    fn test_transmit_read_error_closes_transport() {
        let (transport, state) = mock(b"r");
        let mut link = Link::open(transport).unwrap();
        let result = link.transmit(&[1, 2, 3]);
        assert!(matches!(
            result,
            Err(Error::Transport(MockError::Exhausted))
        ));
        assert_eq!(link.state(), LinkState::Closed);
        assert_eq!(state.borrow().closes, 1);
    }

    #[test]
    fn test_close_happy_path() {
        let (transport, state) = mock(b"rs");
        let mut link = Link::open(transport).unwrap();
        link.close().unwrap();
        assert_eq!(link.state(), LinkState::Closed);
        let state = state.borrow();
        assert_eq!(state.writes, vec![vec![b's']]);
        assert_eq!(state.closes, 1);
    }

    #[test]
    fn test_close_bad_ack_still_closes_transport() {
        let (transport, state) = mock(b"rx");
        let mut link = Link::open(transport).unwrap();
        let result = link.close();
        assert!(matches!(
            result,
            Err(Error::SleepNotAcknowledged { response: b'x' })
        ));
        assert_eq!(link.state(), LinkState::Closed);
        assert_eq!(state.borrow().closes, 1);
    }

    #[test]
    fn test_close_read_error_still_closes_transport() {
        let (transport, state) = mock(b"r");
        let mut link = Link::open(transport).unwrap();
        let result = link.close();
        assert!(matches!(
            result,
            Err(Error::Transport(MockError::Exhausted))
        ));
        assert_eq!(state.borrow().closes, 1);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (transport, state) = mock(b"rs");
        let mut link = Link::open(transport).unwrap();
        link.close().unwrap();
        link.close().unwrap();
        assert_eq!(state.borrow().closes, 1);
    }

    #[test]
    fn test_multiple_transmits_share_one_wake() {
        let (transport, state) = mock(b"rrrs");
        let mut link = Link::open(transport).unwrap();
        link.transmit(&[1]).unwrap();
        link.transmit(&[2]).unwrap();
        link.close().unwrap();
        let state = state.borrow();
        assert_eq!(
            state.writes,
            vec![vec![b'r'], vec![1], vec![b'r'], vec![2], vec![b's']]
        );
        assert_eq!(state.closes, 1);
    }
}
