//! Frame clock with an injectable time source.

use std::time::Instant;

/// Source of elapsed seconds
pub trait TimeSource {
    fn sample(&mut self) -> f32;
}

/// Wall clock, zeroed at the first sample
#[derive(Debug, Default)]
pub struct SystemTimeSource {
    start: Option<Instant>,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeSource for SystemTimeSource {
    fn sample(&mut self) -> f32 {
        let start = *self.start.get_or_insert_with(Instant::now);
        start.elapsed().as_secs_f32()
    }
}

/// Deterministic `0, dt, 2dt, ...`
#[derive(Debug, Clone)]
pub struct FixedStepTimeSource {
    step_s: f32,
    frame: u64,
}

impl FixedStepTimeSource {
    pub fn new(step_s: f32) -> Self {
        Self {
            step_s: step_s.max(0.0),
            frame: 0,
        }
    }
}

impl TimeSource for FixedStepTimeSource {
    fn sample(&mut self) -> f32 {
        // Multiply instead of accumulating to avoid drift
        let t = self.frame as f64 * self.step_s as f64;
        self.frame += 1;
        t as f32
    }
}

/// Elapsed time since the render loop started
pub struct Clock {
    source: Box<dyn TimeSource>,
    elapsed_s: f32,
    held: bool,
}

impl Clock {
    pub fn new(source: Box<dyn TimeSource>) -> Self {
        Self {
            source,
            elapsed_s: 0.0,
            held: false,
        }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemTimeSource::new()))
    }

    pub fn fixed_step(step_s: f32) -> Self {
        Self::new(Box::new(FixedStepTimeSource::new(step_s)))
    }

    /// Sample the source; the result never decreases
    pub fn advance(&mut self) -> f32 {
        if std::mem::take(&mut self.held) {
            return self.elapsed_s;
        }
        let sample = self.source.sample();
        if sample.is_finite() && sample > self.elapsed_s {
            self.elapsed_s = sample;
        }
        self.elapsed_s
    }

    /// Make the next `advance` repeat the current time (a frame was dropped)
    pub fn hold(&mut self) {
        self.held = true;
    }

    pub fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Vec<f32>);

    impl TimeSource for Scripted {
        fn sample(&mut self) -> f32 {
            if self.0.is_empty() {
                0.0
            } else {
                self.0.remove(0)
            }
        }
    }

    #[test]
    fn test_fixed_step_sequence() {
        let mut clock = Clock::fixed_step(0.5);
        assert_eq!(clock.advance(), 0.0);
        assert_eq!(clock.advance(), 0.5);
        assert_eq!(clock.advance(), 1.0);
        assert_eq!(clock.elapsed_s(), 1.0);
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let mut clock = Clock::new(Box::new(Scripted(vec![1.0, 0.5, f32::NAN, 2.0])));
        assert_eq!(clock.advance(), 1.0);
        assert_eq!(clock.advance(), 1.0);
        assert_eq!(clock.advance(), 1.0);
        assert_eq!(clock.advance(), 2.0);
    }

    #[test]
    fn test_hold_repeats_one_sample() {
        let mut clock = Clock::fixed_step(0.5);
        clock.advance();
        assert_eq!(clock.advance(), 0.5);
        clock.hold();
        assert_eq!(clock.advance(), 0.5);
        assert_eq!(clock.advance(), 1.0);
    }

    #[test]
    fn test_system_source_starts_at_zero() {
        let mut source = SystemTimeSource::new();
        let first = source.sample();
        assert!(first < 0.01);
        assert!(source.sample() >= first);
    }
}
