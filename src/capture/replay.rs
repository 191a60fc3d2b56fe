//! Replay of recorded signatures
//!
//! Feeds strokes from a native-format recording back through a
//! `SignaturePad` as pen events, so every stroke fires its own change event
//! exactly as live drawing would.

use crate::capture::pad::SignaturePad;
use crate::capture::surface::{SharedSurface, SurfaceResult};
use crate::capture::types::{Signature, Stroke};
use std::time::Duration;

/// Draw one stroke. Returns false for an empty stroke, which is skipped.
pub fn replay_stroke(pad: &mut SignaturePad, stroke: &Stroke) -> SurfaceResult<bool> {
    let mut points = stroke.points();
    let Some(first) = points.next() else {
        return Ok(false);
    };

    pad.pen_down(first)?;
    for point in points {
        pad.pen_move(point)?;
    }
    Ok(pad.pen_up())
}

/// Replay every stroke of `signature`, sleeping `pacing` between strokes.
///
/// The pad lock is only held while a single stroke is drawn.
/// Returns the number of strokes drawn.
pub async fn replay_signature(
    surface: &SharedSurface<SignaturePad>,
    signature: &Signature,
    pacing: Duration,
) -> SurfaceResult<usize> {
    let mut drawn = 0;
    for stroke in signature.strokes() {
        if drawn > 0 && !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
        let fired = {
            let mut pad = surface.lock();
            replay_stroke(&mut pad, stroke)?
        };
        if fired {
            drawn += 1;
        }
    }

    tracing::debug!("Replayed {} of {} strokes", drawn, signature.len());
    Ok(drawn)
}
