use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Bus transaction failed
    Bus(E),
    /// Channel index outside of 0..CHANNEL_COUNT
    InvalidChannel(u8),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus transfer failed: {:?}", e),
            Error::InvalidChannel(ch) => write!(f, "no such channel: {}", ch),
        }
    }
}
