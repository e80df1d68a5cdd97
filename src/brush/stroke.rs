use crate::foundation::core::{Point, Rect};

/// Evenly spaced samples on the segment `from -> to`, both ends included.
///
/// Consecutive samples are at most `radius / 4` apart, so fast pointer motion still produces a
/// gap-free stroke. A zero-length segment yields exactly one sample.
#[derive(Clone, Debug)]
pub struct StrokeSamples {
    from: Point,
    to: Point,
    steps: u64,
    next: u64,
}

impl StrokeSamples {
    /// A sequence with no samples.
    pub fn empty() -> Self {
        Self {
            from: Point::ORIGIN,
            to: Point::ORIGIN,
            steps: 0,
            next: 1,
        }
    }

    /// Number of segments the line is divided into.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Iterator for StrokeSamples {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next > self.steps {
            return None;
        }
        let i = self.next;
        self.next += 1;
        if self.steps == 0 {
            return Some(self.from);
        }
        if i == self.steps {
            return Some(self.to);
        }
        let t = i as f64 / self.steps as f64;
        Some(self.from.lerp(self.to, t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.steps.saturating_add(1).saturating_sub(self.next);
        let left = usize::try_from(left).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for StrokeSamples {}

/// Interpolate between two consecutive pointer samples for a brush of `radius` pixels.
pub fn interpolate(from: Point, to: Point, radius: u32) -> StrokeSamples {
    let spacing = f64::from(radius.max(1)) / 4.0;
    let distance = from.distance(to);
    let steps = if distance.is_finite() && distance > 0.0 {
        // Float-to-int casts saturate; callers clip long segments before getting here.
        (distance / spacing).ceil() as u64
    } else {
        0
    };
    StrokeSamples {
        from,
        to,
        steps,
        next: 0,
    }
}

/// Part of the segment `from -> to` that lies inside `bounds`, or `None` if it misses.
///
/// Endpoints already inside `bounds` are returned unchanged.
pub fn clip_segment(from: Point, to: Point, bounds: Rect) -> Option<(Point, Point)> {
    let d = to - from;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-d.x, from.x - bounds.x0),
        (d.x, bounds.x1 - from.x),
        (-d.y, from.y - bounds.y0),
        (d.y, bounds.y1 - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    let start = if t0 > 0.0 { from.lerp(to, t0) } else { from };
    let end = if t1 < 1.0 { from.lerp(to, t1) } else { to };
    Some((start, end))
}

/// Pointer state of one in-progress stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokeState {
    last: Option<Point>,
    stamps: u64,
}

impl StrokeState {
    /// `true` between pointer-down and pointer-up.
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    /// Start a stroke at `p`. Returns the single point to stamp.
    pub fn begin(&mut self, p: Point) -> Point {
        self.last = Some(p);
        self.stamps = 1;
        p
    }

    /// Extend the stroke to `p`, returning the samples to stamp, or `None` if no stroke is active.
    pub fn extend(&mut self, p: Point, radius: u32) -> Option<StrokeSamples> {
        self.advance(p, radius, None)
    }

    /// Like [`StrokeState::extend`], but only the part of the segment inside `bounds` is
    /// sampled. The stroke still continues from `p`.
    pub fn extend_within(
        &mut self,
        p: Point,
        radius: u32,
        bounds: Rect,
    ) -> Option<StrokeSamples> {
        self.advance(p, radius, Some(bounds))
    }

    fn advance(&mut self, p: Point, radius: u32, bounds: Option<Rect>) -> Option<StrokeSamples> {
        let from = self.last?;
        self.last = Some(p);
        let samples = match bounds {
            None => interpolate(from, p, radius),
            Some(b) => match clip_segment(from, p, b) {
                Some((start, end)) => interpolate(start, end, radius),
                None => StrokeSamples::empty(),
            },
        };
        self.stamps = self.stamps.saturating_add(samples.len() as u64);
        Some(samples)
    }

    /// End the stroke. Returns the number of stamps it produced, or `None` if none was active.
    pub fn end(&mut self) -> Option<u64> {
        let was_active = self.last.take().is_some();
        let stamps = std::mem::take(&mut self.stamps);
        was_active.then_some(stamps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/stroke.rs"]
mod tests;
