use rand::Rng;

/// Clamps `value` between `min` and `max`; a reversed range clamps to `min`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if max < min {
        return min;
    }
    num::clamp(value, min, max)
}

/// Random integer in `[min, max)`, `None` when the range is empty.
pub fn rand<R: Rng>(rng: &mut R, max: i32, min: i32) -> Option<i32> {
    if max <= min {
        warn!("empty random range [{}, {})", min, max);
        return None;
    }
    Some(rng.random_range(min..max))
}
