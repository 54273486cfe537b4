use core::fmt;

/// Possible errors from the DHT11 driver's strict read path.
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// A bounded line wait exhausted its poll budget, so the frame carried
    /// at least one timeout sentinel.
    Timeout,
    /// The transmitted checksum byte does not equal the modulo-256 sum of
    /// the four data bytes.
    ChecksumMismatch {
        /// Checksum byte as transmitted by the sensor.
        expected: u8,
        /// Sum of the four data bytes, modulo 256.
        computed: u8,
    },
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DhtError::Timeout => f.write_str("line level wait exhausted its poll budget"),
            DhtError::ChecksumMismatch { expected, computed } => write!(
                f,
                "checksum mismatch (transmitted {expected:#04x}, computed {computed:#04x})"
            ),
            DhtError::PinError(err) => write!(f, "GPIO pin error: {err:?}"),
        }
    }
}
