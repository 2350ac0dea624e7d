//! Playing canned frame sequences on the panel.
//!
//! An [`Animation`] is fixed data: frames, how long to hold each one, and a
//! [`PlaybackMode`]. [`play`] shows it once, start to finish, blocking the control
//! thread; there is no pause or cancel.
//!
//! The canned animations live in [`library`].

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

use crate::led_panel::{Frame, LedPanel};
use crate::led_transport::LedWire;
use crate::timing::block_for;

pub mod library;

/// What happens on the panel between two frames.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum PlaybackMode {
    /// The next frame is written straight over the previous one.
    Overwrite,
    /// The panel is cleared and flushed (a dark blink) before the next frame.
    ClearBetween,
}

/// A named, fixed sequence of `(frame, hold)` steps.
#[derive(Clone, Copy, Debug)]
pub struct Animation {
    /// Name used in log output.
    pub name: &'static str,
    /// Transition between frames.
    pub mode: PlaybackMode,
    /// Frames in display order, each with how long it stays up.
    pub steps: &'static [(Frame, Duration)],
}

impl Animation {
    /// Sum of every hold: the minimum wall-clock length of one playback.
    #[must_use]
    pub fn total_hold(&self) -> Duration {
        self.steps
            .iter()
            .fold(Duration::from_ticks(0), |total, (_, hold)| total + *hold)
    }

    /// Number of flushes one playback performs.
    #[must_use]
    pub const fn flush_count(&self) -> usize {
        let frames = self.steps.len();
        match self.mode {
            PlaybackMode::Overwrite => frames,
            PlaybackMode::ClearBetween => (frames * 2).saturating_sub(1),
        }
    }
}

/// Show every frame of `animation` in order, holding each for its duration.
///
/// Each frame is loaded through the serpentine map and flushed, then held. In
/// [`PlaybackMode::ClearBetween`] the panel is cleared and flushed between
/// frames (not after the last one). The final frame stays lit.
pub fn play<W, D>(panel: &mut LedPanel<W>, delay: &mut D, animation: &Animation)
where
    W: LedWire,
    D: DelayNs,
{
    info!(
        "Animation {}: {} frames, {:?}",
        animation.name,
        animation.steps.len(),
        animation.mode
    );
    for (frame_index, (frame, hold)) in animation.steps.iter().enumerate() {
        if frame_index > 0 && animation.mode == PlaybackMode::ClearBetween {
            panel.clear();
            panel.flush();
        }
        trace!("Animation {}: frame {}", animation.name, frame_index);
        panel.show_frame(frame);
        block_for(delay, *hold);
    }
    debug!("Animation {}: done", animation.name);
}
