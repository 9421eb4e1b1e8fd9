//! Spectrum frames and the sources that produce them.

/// One snapshot of per-bin magnitudes (0-255), lowest frequency first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpectrumFrame {
    bins: Vec<u8>,
}

impl SpectrumFrame {
    /// All-zero frame with `bin_count` bins
    pub fn zeroed(bin_count: usize) -> Self {
        Self {
            bins: vec![0; bin_count],
        }
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub(crate) fn bins_mut(&mut self) -> &mut [u8] {
        &mut self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn is_silent(&self) -> bool {
        self.bins.iter().all(|&b| b == 0)
    }
}

impl From<Vec<u8>> for SpectrumFrame {
    fn from(bins: Vec<u8>) -> Self {
        Self { bins }
    }
}

/// Producer of one spectrum frame per rendered frame
///
/// Calling `sample` again before new audio arrives must return the same
/// bytes. A source with no audio attached returns a zero frame.
pub trait SpectrumSource {
    /// Current magnitude spectrum
    fn sample(&mut self) -> &SpectrumFrame;

    /// Frame length, fixed unless the source is reconfigured
    fn bin_count(&self) -> usize;
}

impl<S: SpectrumSource + ?Sized> SpectrumSource for Box<S> {
    fn sample(&mut self) -> &SpectrumFrame {
        (**self).sample()
    }

    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }
}

/// Source used while no audio graph exists: always silent
#[derive(Clone, Debug)]
pub struct SilentSource {
    frame: SpectrumFrame,
}

impl SilentSource {
    pub fn new(bin_count: usize) -> Self {
        Self {
            frame: SpectrumFrame::zeroed(bin_count),
        }
    }
}

impl SpectrumSource for SilentSource {
    fn sample(&mut self) -> &SpectrumFrame {
        &self.frame
    }

    fn bin_count(&self) -> usize {
        self.frame.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_source_is_zero_filled() {
        let mut source = SilentSource::new(1024);
        assert_eq!(source.bin_count(), 1024);

        let frame = source.sample();
        assert_eq!(frame.len(), 1024);
        assert!(frame.is_silent());
    }

    #[test]
    fn test_boxed_source_delegates() {
        let mut source: Box<dyn SpectrumSource> = Box::new(SilentSource::new(16));
        assert_eq!(source.bin_count(), 16);
        assert_eq!(source.sample().bins(), &[0u8; 16]);
    }
}
