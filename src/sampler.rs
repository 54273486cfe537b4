//! Bounded busy-wait polling of the sensor line.
//!
//! The DHT11 has no clock line, so every edge the protocol depends on is
//! detected by polling the data pin in a tight loop. The wait is bounded by
//! an iteration count rather than a wall-clock deadline: counting loop
//! passes needs no timer, and the budget doubles as the only time proxy in
//! the driver. The real-world duration of a budget therefore scales with
//! the execution speed of the polling loop.

use embedded_hal::digital::{InputPin, PinState};

/// Polls `pin` until it reads `level`, giving up after `budget` polls.
///
/// Returns `Ok(true)` the moment the observed level equals `level` and
/// `Ok(false)` once `budget` polls have all missed; a `budget` of zero
/// never touches the pin. Each iteration samples the pin exactly once and
/// performs no delay, so the budget is a pure iteration count.
///
/// Budget exhaustion is not an error: a stuck line simply yields
/// `Ok(false)` and the caller decides what that means. `Err` is reserved
/// for failures of the pin itself.
pub fn wait_for_level<P: InputPin>(
    pin: &mut P,
    level: PinState,
    budget: u32,
) -> Result<bool, P::Error> {
    for _ in 0..budget {
        let at_level = match level {
            PinState::High => pin.is_high()?,
            PinState::Low => pin.is_low()?,
        };
        if at_level {
            return Ok(true);
        }
    }
    Ok(false)
}
