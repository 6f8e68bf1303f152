//! Reusable resample buffers
//!
//! A bootstrap run gathers every input sequence at a fresh set of indices on
//! each iteration. The workspace keeps one buffer per sequence plus an index
//! buffer alive across iterations so a run allocates once.

/// Buffers reused across bootstrap iterations
#[derive(Debug, Default)]
pub struct ResampleWorkspace {
    indices: Vec<usize>,
    buffers: Vec<Vec<f64>>,
}

impl ResampleWorkspace {
    /// Create a workspace sized for `n_args` sequences of length `capacity`
    pub fn new(n_args: usize, capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            buffers: (0..n_args).map(|_| Vec::with_capacity(capacity)).collect(),
        }
    }

    /// Index buffer, cleared
    pub fn index_buffer(&mut self) -> &mut Vec<usize> {
        self.indices.clear();
        &mut self.indices
    }

    /// Gather every source at the indices currently held in the index buffer
    pub fn gather_current(&mut self, sources: &[&[f64]]) -> Vec<&[f64]> {
        let Self { indices, buffers } = self;
        Self::fill(buffers, sources, indices)
    }

    /// Gather every source at `indices`
    pub fn gather(&mut self, sources: &[&[f64]], indices: &[usize]) -> Vec<&[f64]> {
        Self::fill(&mut self.buffers, sources, indices)
    }

    fn fill<'a>(
        buffers: &'a mut Vec<Vec<f64>>,
        sources: &[&[f64]],
        indices: &[usize],
    ) -> Vec<&'a [f64]> {
        if buffers.len() < sources.len() {
            buffers.resize_with(sources.len(), Vec::new);
        }
        for (buffer, source) in buffers.iter_mut().zip(sources) {
            buffer.clear();
            buffer.extend(indices.iter().map(|&i| source[i]));
        }
        buffers[..sources.len()].iter().map(Vec::as_slice).collect()
    }
}
