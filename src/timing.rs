//! Blocking pauses.
//!
//! Every sleep in the firmware goes through [`block_for`]. The control thread
//! does nothing else while it waits, so a key pressed during a pause is not seen.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

/// Block the control thread for `duration`, at millisecond resolution.
///
/// Durations longer than `u32::MAX` milliseconds are clamped.
pub fn block_for(delay: &mut impl DelayNs, duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    if millis > 0 {
        delay.delay_ms(millis);
    }
}
