//! Canned melodies. Durations are multiples of the 50 ms cascade tick.

use super::{Melody, Note};

const C4: u32 = 262;
const D4: u32 = 294;
const E4: u32 = 330;
const F4: u32 = 349;
const G4: u32 = 392;

const QUARTER: u64 = 400;
const GAP: u64 = 50;

/// Opening phrase of Beethoven's "Ode to Joy".
pub static ODE_TO_JOY: Melody = Melody {
    name: "ode to joy",
    notes: &[
        Note::new(E4, QUARTER, GAP),
        Note::new(E4, QUARTER, GAP),
        Note::new(F4, QUARTER, GAP),
        Note::new(G4, QUARTER, GAP),
        Note::new(G4, QUARTER, GAP),
        Note::new(F4, QUARTER, GAP),
        Note::new(E4, QUARTER, GAP),
        Note::new(D4, QUARTER, GAP),
        Note::new(C4, QUARTER, GAP),
        Note::new(C4, QUARTER, GAP),
        Note::new(D4, QUARTER, GAP),
        Note::new(E4, QUARTER, GAP),
        Note::new(E4, QUARTER * 3 / 2, GAP),
        Note::new(D4, QUARTER / 2, GAP),
        Note::new(D4, QUARTER * 2, 200),
    ],
};
