//! Single guess against a single network.

use rand::Rng;

use crate::network::Network;

/// Try `guessed_password` against `network`
///
/// Succeeds only when the guess names an existing, vulnerable device and a
/// uniform draw in `[0, 1)` falls below `success_probability`. The draw is
/// skipped when either earlier check fails.
pub fn attempt<R: Rng + ?Sized>(
    network: &Network,
    guessed_password: &str,
    success_probability: f64,
    rng: &mut R,
) -> bool {
    if !network.contains_device(guessed_password) {
        return false;
    }
    match network.is_vulnerable(guessed_password) {
        Ok(true) => rng.gen::<f64>() < success_probability,
        _ => false,
    }
}
