use common::{LengthSize, NalUnit};
use log::{debug, trace};

use crate::errors::SampleError;

/// `Sample` is one access unit stored as a sequence of length-prefixed `NalUnit`s, as found in the
/// `mdat` of an ISO-BMFF file carrying AVC or HEVC video.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    data: &'a [u8],
    length_size: LengthSize,
    strict: bool,
}

impl<'a> Sample<'a> {
    /// `data` must be the complete sample. Nothing is read until units are requested.
    pub fn new(data: &'a [u8], length_size: LengthSize) -> Self {
        Self {
            data,
            length_size,
            strict: false,
        }
    }

    /// In strict mode a non-empty sample shorter than one length field fails with
    /// `SampleError::SampleTooShort`, and bytes left over after the last unit fail with
    /// `SampleError::TrailingBytes`. Otherwise both are ignored.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn length_size(&self) -> LengthSize {
        self.length_size
    }

    pub fn nal_units(&self) -> NalUnits<'a> {
        NalUnits {
            data: self.data,
            cursor: 0,
            length_size: self.length_size,
            strict: self.strict,
            done: false,
        }
    }

    /// Splits the sample into its `NalUnit`s, in stream order.
    ///
    /// A `TruncatedNalu` error discards the units read before it. Iterate `nal_units` instead to
    /// keep them.
    pub fn extract(&self) -> Result<Vec<NalUnit<'a>>, SampleError> {
        self.nal_units().collect()
    }

    /// Like `extract`, also returning how many bytes of the sample were consumed. A lenient
    /// caller can compare it with `len` to detect trailing bytes.
    pub fn extract_with_consumed(&self) -> Result<(Vec<NalUnit<'a>>, usize), SampleError> {
        let mut nal_units = self.nal_units();
        let mut out = Vec::new();
        for nal_unit in nal_units.by_ref() {
            out.push(nal_unit?);
        }

        Ok((out, nal_units.bytes_consumed()))
    }
}

/// Iterator over the `NalUnit`s of a `Sample`.
///
/// Yields every unit up to the first error, then the error, then `None`.
#[derive(Debug, Clone)]
pub struct NalUnits<'a> {
    data: &'a [u8],
    cursor: usize,
    length_size: LengthSize,
    strict: bool,
    done: bool,
}

impl<'a> NalUnits<'a> {
    /// Number of bytes read so far, length fields of skipped zero-length units included. Never
    /// exceeds the sample length.
    pub fn bytes_consumed(&self) -> usize {
        self.cursor
    }

    fn read_next(&mut self) -> Result<Option<NalUnit<'a>>, SampleError> {
        let width = self.length_size.width();

        loop {
            let remaining = self.data.len() - self.cursor;
            if remaining < width {
                self.finish(remaining)?;
                return Ok(None);
            }

            let prefix_offset = self.cursor;
            let declared_length = self.length_size.read(&self.data[prefix_offset..]);
            let payload_offset = prefix_offset + width;

            if declared_length == 0 {
                debug!("skipping zero-length NAL unit at position {prefix_offset}");
                self.cursor = payload_offset;
                continue;
            }

            let available = self.data.len() - payload_offset;
            if declared_length > available {
                return Err(SampleError::TruncatedNalu {
                    declared_length,
                    available,
                    offset: prefix_offset,
                });
            }

            let nal_unit = NalUnit::new(self.data, payload_offset, declared_length);
            self.cursor = nal_unit.end();
            trace!(
                "NAL unit at position {} with {} bytes",
                nal_unit.offset(),
                nal_unit.len()
            );

            return Ok(Some(nal_unit));
        }
    }

    // `remaining` bytes are too few to hold another length field.
    fn finish(&self, remaining: usize) -> Result<(), SampleError> {
        if remaining == 0 {
            return Ok(());
        }

        if !self.strict {
            debug!(
                "ignoring {remaining} trailing bytes at position {}",
                self.cursor
            );
            return Ok(());
        }

        if self.cursor == 0 {
            Err(SampleError::SampleTooShort {
                len: self.data.len(),
                length_size: self.length_size,
            })
        } else {
            Err(SampleError::TrailingBytes {
                offset: self.cursor,
                remaining,
            })
        }
    }
}

impl<'a> Iterator for NalUnits<'a> {
    type Item = Result<NalUnit<'a>, SampleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_next() {
            Ok(Some(nal_unit)) => Some(Ok(nal_unit)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for NalUnits<'_> {}

/// Splits `sample` into `NalUnit`s whose lengths are `length_size`-byte big-endian fields.
///
/// `length_size` must be 1, 2, or 4. It is only checked once a length field has to be read, so an
/// empty sample yields no units whatever the width.
pub fn extract(sample: &[u8], length_size: u8) -> Result<Vec<NalUnit<'_>>, SampleError> {
    if sample.is_empty() {
        return Ok(Vec::new());
    }

    Sample::new(sample, LengthSize::try_from(length_size)?).extract()
}

/// Splits `sample` into `NalUnit`s with 4-byte length fields, the layout written by nearly every
/// MP4 muxer.
pub fn extract_four(sample: &[u8]) -> Result<Vec<NalUnit<'_>>, SampleError> {
    Sample::new(sample, LengthSize::Four).extract()
}
