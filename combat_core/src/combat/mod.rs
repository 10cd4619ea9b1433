//! Damage pipeline - outgoing rolls and incoming resolution

mod incoming;
mod outgoing;
mod result;

pub use incoming::{apply_incoming, resolve_incoming, HitInterceptor, MIN_CHIP_DAMAGE};
pub use outgoing::{roll_outgoing, roll_outgoing_for, OutgoingHit};
pub use result::HitResult;
