/*!
 * Splitting a job's texts into fixed-size batches.
 */

/// Default number of texts submitted per backend call
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// A contiguous slice of the job's texts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Batch<'a> {
    /// Zero-based position of the batch within the job
    pub index: usize,
    /// Offset of the first text in the job
    pub offset: usize,
    /// The texts of this batch
    pub texts: &'a [String],
    /// Whether no batch follows this one
    pub is_last: bool,
}

impl Batch<'_> {
    /// Number of texts in the batch
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the batch holds no texts
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Split `texts` into batches of at most `batch_size` texts, in order
///
/// A `batch_size` of zero is treated as one.
pub fn chunk(texts: &[String], batch_size: usize) -> impl Iterator<Item = Batch<'_>> {
    let batch_size = batch_size.max(1);
    let total = batch_count(texts.len(), batch_size);

    texts.chunks(batch_size).enumerate().map(move |(index, slice)| Batch {
        index,
        offset: index * batch_size,
        texts: slice,
        is_last: index + 1 == total,
    })
}

/// Number of batches `chunk` yields for `len` texts
pub fn batch_count(len: usize, batch_size: usize) -> usize {
    len.div_ceil(batch_size.max(1))
}
