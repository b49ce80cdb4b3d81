//! Injectable randomness for the generator.

/// A source of uniform draws in `[0.0, 1.0)`.
///
/// The generator takes this instead of calling the system RNG directly so
/// tests can script an exact draw sequence and assert exact outputs.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

/// Production source backed by the thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySource;

impl UniformSource for EntropySource {
    fn next_unit(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Replays a fixed sequence of draws, in order.
///
/// # Panics
///
/// Panics when asked for more draws than it was given; a scripted test that
/// runs dry is a bug in the script, not a condition to paper over.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }
}

impl UniformSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        assert!(
            self.pos < self.values.len(),
            "SequenceSource exhausted after {} draws",
            self.values.len()
        );
        let value = self.values[self.pos];
        self.pos += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_source_replays_in_order() {
        let mut source = SequenceSource::new(vec![0.1, 0.9, 0.5]);
        assert!((source.next_unit() - 0.1).abs() < f64::EPSILON);
        assert!((source.next_unit() - 0.9).abs() < f64::EPSILON);
        assert!((source.next_unit() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn sequence_source_panics_when_exhausted() {
        let mut source = SequenceSource::new(vec![0.1]);
        source.next_unit();
        source.next_unit();
    }

    #[test]
    fn entropy_source_stays_in_unit_interval() {
        let mut source = EntropySource;
        for _ in 0..1_000 {
            let v = source.next_unit();
            assert!((0.0..1.0).contains(&v), "draw out of range: {v}");
        }
    }
}
