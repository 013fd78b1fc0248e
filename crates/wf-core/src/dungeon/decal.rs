//! Blood decals

use serde::{Deserialize, Serialize};

use crate::consts::{DECAL_CRIT_SCALE, DECAL_HIT_ALPHA};
use crate::map::Pos;

/// A stain on a floor tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decal {
    pub pos: Pos,
    /// Intensity in (0, 1]
    pub alpha: f32,
}

/// Add or intensify the decal at `pos` after a hit
pub fn splatter(decals: &mut Vec<Decal>, pos: Pos, crit: bool) {
    let amount = if crit {
        DECAL_HIT_ALPHA * DECAL_CRIT_SCALE
    } else {
        DECAL_HIT_ALPHA
    };
    match decals.iter_mut().find(|d| d.pos == pos) {
        Some(decal) => decal.alpha = (decal.alpha + amount).min(1.0),
        None => decals.push(Decal {
            pos,
            alpha: amount.min(1.0),
        }),
    }
}

/// Fade every decal by `factor` and drop the ones below `min_alpha`
///
/// Returns the number removed.
pub fn fade_decals(decals: &mut Vec<Decal>, factor: f32, min_alpha: f32) -> usize {
    let before = decals.len();
    decals.retain_mut(|d| {
        d.alpha *= factor;
        d.alpha >= min_alpha
    });
    before - decals.len()
}
