/// Turns `requestAnimationFrame` timestamps into elapsed / delta seconds.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    origin_ms: Option<f64>,
    last_ms: Option<f64>,
    elapsed: f32,
    delta: f32,
}

impl FrameClock {
    /// Longest step fed to eased animators, so a backgrounded tab does not
    /// snap the camera when it comes back.
    pub const MAX_DELTA: f32 = 0.1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Advances to `now_ms`; the first tick starts the clock at zero.
    pub fn tick(&mut self, now_ms: f64) -> (f32, f32) {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let last = self.last_ms.replace(now_ms).unwrap_or(now_ms);

        let delta = ((now_ms - last) / 1000.0).max(0.0) as f32;
        self.delta = delta.min(Self::MAX_DELTA);
        self.elapsed = ((now_ms - origin) / 1000.0).max(0.0) as f32;
        (self.elapsed, self.delta)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}
