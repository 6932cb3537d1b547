/// Default length of the entrance animation that follows each visibility event.
pub const ANIM_DURATION_MS: u64 = 1000;

/// Linear entrance progress for `elapsed_ms` since the last visibility event.
///
/// Saturates at `1.0` once `duration_ms` has elapsed and stays there until the next event.
/// Non-positive elapsed time (including clock skew) yields `0.0`.
pub fn raw_progress(elapsed_ms: i64, duration_ms: u64) -> f64 {
    if elapsed_ms <= 0 {
        return 0.0;
    }
    let elapsed = elapsed_ms.unsigned_abs();
    if elapsed >= duration_ms {
        return 1.0;
    }
    (elapsed % duration_ms) as f64 / duration_ms as f64
}

#[cfg(test)]
#[path = "../../tests/unit/animation/progress.rs"]
mod tests;
