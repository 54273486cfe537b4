use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin, PinState},
};

use crate::error::DhtError;
use crate::sampler;

/// Number of polling-loop passes a bounded line wait may burn before it is
/// abandoned.
///
/// Every wait in the protocol shares this one budget: the acknowledgment
/// wait after the start signal and both edge waits of every bit. It is an
/// iteration count, not a duration; see [`sampler::wait_for_level`].
pub const POLL_BUDGET: u32 = 10_000;

/// Byte value recorded for a field whose decode exhausted [`POLL_BUDGET`].
///
/// The sentinel shares the value space of genuine data, so a `0xFF` field
/// cannot be told apart from a timeout by looking at the frame alone; the
/// [`ReadOutcome`] paired with the frame carries that distinction.
pub const TIMEOUT_SENTINEL: u8 = 0xFF;

/// How long the start signal holds the line low so the sensor cannot miss
/// the request (milliseconds).
const START_LOW_MS: u32 = 18;

/// Release pulse after the start signal, before the sensor takes over the
/// line (microseconds).
const START_RELEASE_US: u32 = 30;

/// Settle time from the acknowledgment edge, long enough to sit out the
/// sensor's 80 us low and 80 us high ready pulses (microseconds).
const RESPONSE_SETTLE_US: u32 = 160;

/// Sample point within a bit's high pulse (microseconds): a short "0"
/// pulse has already fallen back low by then, a long "1" pulse is still
/// high.
const BIT_SAMPLE_US: u32 = 30;

/// Driver for the DHT11 temperature and humidity sensor.
///
/// The driver owns the data pin, and a read transaction borrows the driver
/// mutably for its whole duration, so no other owner can drive or
/// reconfigure the line while a read is in progress.
pub struct Dht11<PIN, D> {
    pin: PIN,
    delay: D,
}

/// One five-byte frame as transmitted by the DHT11, untouched.
///
/// The four data fields are the sensor's integer/fractional split of
/// humidity and temperature. No scaling or sign handling happens here;
/// interpreting the split is the consumer's business. Every field is
/// overwritten on every read attempt, successful or not, so a frame is
/// never partially stale; a field whose decode timed out holds
/// [`TIMEOUT_SENTINEL`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawReading {
    /// Integer part of the relative humidity, in percent.
    pub humidity_integer: u8,
    /// Fractional part of the relative humidity.
    pub humidity_fraction: u8,
    /// Integer part of the temperature, in degrees Celsius.
    pub temperature_integer: u8,
    /// Fractional part of the temperature.
    pub temperature_fraction: u8,
    /// Checksum byte as transmitted by the sensor.
    pub checksum: u8,
}

/// Verdict paired with every decoded frame.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// All five fields decoded and the checksum holds.
    Success,
    /// All five fields decoded, but the transmitted checksum disagrees
    /// with the modulo-256 sum of the data bytes.
    ChecksumMismatch,
    /// At least one field exhausted its poll budget and holds
    /// [`TIMEOUT_SENTINEL`] instead of sensor data.
    Timeout,
}

/// Decode result for one in-frame byte, before sentinel substitution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ByteRead {
    Decoded(u8),
    TimedOut,
}

impl RawReading {
    /// Sum of the four data bytes, modulo 256.
    pub fn computed_checksum(&self) -> u8 {
        self.humidity_integer
            .wrapping_add(self.humidity_fraction)
            .wrapping_add(self.temperature_integer)
            .wrapping_add(self.temperature_fraction)
    }

    /// Applies the checksum law to the frame: [`ReadOutcome::Success`] when
    /// the transmitted checksum equals [`computed_checksum`], otherwise
    /// [`ReadOutcome::ChecksumMismatch`].
    ///
    /// This is pure arithmetic over the five bytes. A frame carrying
    /// timeout sentinels is judged like any other: usually the sentinel
    /// tail breaks the sum, but a transmitted `0xFF` checksum can coincide
    /// with it.
    ///
    /// [`computed_checksum`]: Self::computed_checksum
    pub fn validate(&self) -> ReadOutcome {
        if self.computed_checksum() == self.checksum {
            ReadOutcome::Success
        } else {
            ReadOutcome::ChecksumMismatch
        }
    }

    /// The frame in publication order: temperature integer, temperature
    /// fraction, humidity integer, humidity fraction, checksum.
    ///
    /// Remote readers consume the bytes in exactly this order and width,
    /// verbatim.
    pub fn wire_bytes(&self) -> [u8; 5] {
        [
            self.temperature_integer,
            self.temperature_fraction,
            self.humidity_integer,
            self.humidity_fraction,
            self.checksum,
        ]
    }
}

impl<PIN, DELAY, E> Dht11<PIN, DELAY>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Creates a new instance of the DHT11 driver.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the DHT11 data line, wired
    ///   open-drain with a pull-up so the idle level is high. Must support
    ///   both input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(pin: PIN, delay: DELAY) -> Self {
        Dht11 { pin, delay }
    }

    /// Runs one complete read transaction and returns the raw frame
    /// together with its verdict.
    ///
    /// One transaction is one best-effort attempt: the start signal, the
    /// ready handshake, then the five fields in transmission order
    /// (humidity integer, humidity fraction, temperature integer,
    /// temperature fraction, checksum). A field whose decode times out is
    /// recorded as [`TIMEOUT_SENTINEL`] and decoding moves on to the next
    /// field, so the returned frame is always fully populated.
    ///
    /// The outcome is [`ReadOutcome::Timeout`] if any field timed out;
    /// otherwise the checksum decides between [`ReadOutcome::Success`] and
    /// [`ReadOutcome::ChecksumMismatch`]. The sentinel is a legal data
    /// value, so callers that instead want timed-out frames folded into
    /// the checksum verdict can apply [`RawReading::validate`] to the
    /// returned frame.
    ///
    /// `Err` is reserved for pin failures; protocol faults never error.
    pub fn read_raw(&mut self) -> Result<(RawReading, ReadOutcome), DhtError<E>> {
        self.start()?;

        let mut fields = [0u8; 5];
        let mut timed_out = false;
        for field in fields.iter_mut() {
            *field = match self.read_byte()? {
                ByteRead::Decoded(byte) => byte,
                ByteRead::TimedOut => {
                    timed_out = true;
                    TIMEOUT_SENTINEL
                }
            };
        }

        let [humidity_integer, humidity_fraction, temperature_integer, temperature_fraction, checksum] =
            fields;
        let reading = RawReading {
            humidity_integer,
            humidity_fraction,
            temperature_integer,
            temperature_fraction,
            checksum,
        };
        let outcome = if timed_out {
            ReadOutcome::Timeout
        } else {
            reading.validate()
        };
        Ok((reading, outcome))
    }

    /// Reads one frame and treats anything but a clean success as an
    /// error.
    ///
    /// Convenience wrapper over [`read_raw`](Self::read_raw) for callers
    /// with no use for a frame that failed validation. No retry is
    /// attempted; when to try again is the caller's cadence to choose.
    pub fn read(&mut self) -> Result<RawReading, DhtError<E>> {
        let (reading, outcome) = self.read_raw()?;
        match outcome {
            ReadOutcome::Success => Ok(reading),
            ReadOutcome::ChecksumMismatch => Err(DhtError::ChecksumMismatch {
                expected: reading.checksum,
                computed: reading.computed_checksum(),
            }),
            ReadOutcome::Timeout => Err(DhtError::Timeout),
        }
    }

    /// Sends the start signal and performs the ready handshake.
    ///
    /// Holds the line low for 18 ms so the sensor registers the request,
    /// releases it high for about 30 us, then waits for the sensor to pull
    /// the line low in acknowledgment and sits out the 160 us of ready
    /// pulses before field decoding starts.
    fn start(&mut self) -> Result<(), E> {
        self.pin.set_low()?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high()?;
        self.delay.delay_us(START_RELEASE_US);

        // The acknowledgment is the sensor pulling the released line low;
        // an absent sensor leaves the pull-up holding it high until the
        // budget runs out. A miss does not abort the transaction: the field
        // decodes that follow carry their own budgets and surface a dead
        // line as sentinel bytes.
        let _acknowledged = sampler::wait_for_level(&mut self.pin, PinState::Low, POLL_BUDGET)?;
        #[cfg(feature = "defmt")]
        if !_acknowledged {
            defmt::warn!("DHT11 did not acknowledge the start signal; reading anyway");
        }

        self.delay.delay_us(RESPONSE_SETTLE_US);
        Ok(())
    }

    /// Decodes one in-frame byte, most-significant bit first.
    ///
    /// A timeout on either edge wait of any bit abandons the remaining
    /// bits of this byte only.
    fn read_byte(&mut self) -> Result<ByteRead, E> {
        let mut byte: u8 = 0;

        for i in 0..8 {
            match self.read_bit()? {
                Some(true) => byte |= 1 << (7 - i),
                Some(false) => {}
                None => return Ok(ByteRead::TimedOut),
            }
        }

        Ok(ByteRead::Decoded(byte))
    }

    /// Decodes a single pulse-width-encoded bit, `None` on a timed-out
    /// edge wait.
    ///
    /// A bit starts when the line rises out of the inter-bit low gap. One
    /// sample 30 us later tells the pulse widths apart: a short "0" pulse
    /// has already fallen back low, a long "1" pulse is still high. The
    /// trailing wait for the falling edge resynchronizes the decoder for
    /// the next bit.
    fn read_bit(&mut self) -> Result<Option<bool>, E> {
        if !sampler::wait_for_level(&mut self.pin, PinState::High, POLL_BUDGET)? {
            return Ok(None);
        }

        self.delay.delay_us(BIT_SAMPLE_US);
        let bit = self.pin.is_high()?;

        if !sampler::wait_for_level(&mut self.pin, PinState::Low, POLL_BUDGET)? {
            return Ok(None);
        }

        Ok(Some(bit))
    }
}
