use std::ops::{Deref, Range};

/// `NalUnit` is a view of one NAL unit inside a length-prefixed sample. It borrows the payload
/// bytes from the sample and never copies them, so it cannot outlive the sample it was read from.
///
/// The payload excludes the unit's own length prefix. It starts with the NAL unit header, whose
/// interpretation is left to the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NalUnit<'a> {
    /// Position of the first payload byte, counted from the start of the sample.
    offset: usize,

    /// `num_bytes` is the value of the length field that preceded this unit. It is never zero:
    /// zero-length entries are padding and are not surfaced as units.
    num_bytes: usize,

    data: &'a [u8],
}

impl<'a> NalUnit<'a> {
    /// `sample` is the whole sample; `offset..offset + num_bytes` must lie within it.
    pub fn new(sample: &'a [u8], offset: usize, num_bytes: usize) -> Self {
        Self {
            offset,
            num_bytes,
            data: &sample[offset..offset + num_bytes],
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.num_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.num_bytes == 0
    }

    /// Byte range of the payload within the sample.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.num_bytes
    }

    /// End of the payload, which is where the next length prefix begins.
    pub fn end(&self) -> usize {
        self.offset + self.num_bytes
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl Deref for NalUnit<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl AsRef<[u8]> for NalUnit<'_> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}
