use std::ops::Range;

const SIZE_PX: Range<f64> = 1.0..3.0;
const OPACITY: Range<f64> = 0.3..1.0;
const DURATION_MS: Range<f64> = 3_000.0..7_000.0;
const DRIFT_PX: Range<f64> = -25.0..-5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DecorativeStar {
    pub index: usize,
    pub size_px: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub opacity: f64,
    pub drift_px: f64,
    pub duration_ms: u32,
}

impl DecorativeStar {
    /// Inline style for the star's element. The keyframes referenced here
    /// oscillate between `translateY(0)` and `var(--star-drift)`.
    pub fn style(&self) -> String {
        format!(
            "width: {size:.2}px; height: {size:.2}px; left: {left:.2}%; top: {top:.2}%; \
             opacity: {opacity:.2}; --star-drift: {drift:.2}px; \
             animation: star-drift {duration}ms ease-in-out infinite alternate;",
            size = self.size_px,
            left = self.left_pct,
            top = self.top_pct,
            opacity = self.opacity,
            drift = self.drift_px,
            duration = self.duration_ms,
        )
    }
}

fn lerp(range: Range<f64>, t: f64) -> f64 {
    range.start + (range.end - range.start) * t.clamp(0.0, 1.0)
}

/// Builds `count` stars from `sample`, which must yield values in `[0, 1)`.
pub fn generate(count: usize, mut sample: impl FnMut() -> f64) -> Vec<DecorativeStar> {
    (0..count)
        .map(|index| DecorativeStar {
            index,
            size_px: lerp(SIZE_PX, sample()),
            left_pct: lerp(0.0..100.0, sample()),
            top_pct: lerp(0.0..100.0, sample()),
            opacity: lerp(OPACITY, sample()),
            drift_px: lerp(DRIFT_PX, sample()),
            duration_ms: lerp(DURATION_MS, sample()).round() as u32,
        })
        .collect()
}

/// Handles of the star nodes currently attached to the page. `mount` attaches
/// once; `unmount` detaches every handle it holds.
#[derive(Debug)]
pub struct StarField<H> {
    mounted: Vec<H>,
}

impl<H> Default for StarField<H> {
    fn default() -> Self {
        Self {
            mounted: Vec::new(),
        }
    }
}

impl<H> StarField<H> {
    /// Generates `count` stars and hands each to `attach`. A failed attach
    /// detaches whatever was attached before it. Mounting a field that already
    /// holds stars is a no-op.
    pub fn mount<E>(
        &mut self,
        count: usize,
        sample: impl FnMut() -> f64,
        mut attach: impl FnMut(&DecorativeStar) -> Result<H, E>,
        detach: impl FnMut(H),
    ) -> Result<usize, E> {
        if !self.is_empty() {
            return Ok(self.len());
        }

        for star in generate(count, sample) {
            match attach(&star) {
                Ok(handle) => self.mounted.push(handle),
                Err(error) => {
                    self.unmount(detach);
                    return Err(error);
                }
            }
        }

        Ok(self.len())
    }

    pub fn unmount(&mut self, detach: impl FnMut(H)) -> usize {
        let removed = self.mounted.len();
        self.mounted.drain(..).for_each(detach);
        removed
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}
