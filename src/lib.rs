//! DHT11 Raw-Frame Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT11 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits. It
//! drives the sensor's single-wire protocol, from the timed start signal
//! and ready handshake through the pulse-width decode of the 40-bit frame,
//! and hands back the five transmitted bytes untouched, paired with a
//! [`ReadOutcome`] verdict, so a remote consumer can receive the frame
//! byte-for-byte and interpret it itself.
//!
//! Line waits are bounded by an iteration budget ([`POLL_BUDGET`]) rather
//! than a wall clock; a field whose wait exhausts the budget is recorded as
//! the in-band sentinel [`TIMEOUT_SENTINEL`] while decoding continues, and
//! the timeout is reported out-of-band through the outcome. One call is one
//! best-effort transaction: there are no retries, and a failed cycle hands
//! the caller everything needed to decide whether to republish.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Raw five-byte frames in transmission order, no scaling or conversion
//! - Designed for `no_std` environments
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for the shared data line (wire it
//!   open-drain with a pull-up so the idle level is high)
//! - [`DelayNs`] for the protocol's fixed delays
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for the data-model types and logs
//!   a warning when the sensor misses the start-signal acknowledgment
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod dht11;
pub mod error;
pub mod sampler;

pub use dht11::{Dht11, POLL_BUDGET, RawReading, ReadOutcome, TIMEOUT_SENTINEL};
pub use error::DhtError;
