use std::fs::File;

use common::{LengthSize, NalUnit};
use log::debug;
use memmap::Mmap;

use crate::errors::DecodingError;
use crate::sample::Sample;

/// `SampleDecoder` reads NAL units from a file holding exactly one length-prefixed sample, such as
/// a sample dumped from an `mdat` box.
#[derive(Debug)]
pub struct SampleDecoder {
    // `None` for empty files, which cannot be mapped.
    data: Option<Mmap>,
    length_size: LengthSize,
    strict: bool,
}

impl SampleDecoder {
    pub fn from_file(file: File, length_size: LengthSize) -> Result<Self, DecodingError> {
        let data = match file.metadata()?.len() {
            0 => None,
            _ => Some(unsafe { Mmap::map(&file)? }),
        };

        Ok(Self {
            data,
            length_size,
            strict: false,
        })
    }

    pub fn from_file_path(file_path: &str, length_size: LengthSize) -> Result<Self, DecodingError> {
        let file = File::open(file_path)?;
        debug!("mapping sample file {file_path}");
        SampleDecoder::from_file(file, length_size)
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample(&self) -> Sample<'_> {
        Sample::new(self.as_bytes(), self.length_size).strict(self.strict)
    }

    /// Input to this process is the mapped sample, an ordered stream of length-prefixed NAL units.
    ///
    /// Output of this process is the sequence of NAL units, each borrowing from the mapping.
    pub fn decode(&self) -> Result<Vec<NalUnit<'_>>, DecodingError> {
        let nal_units = self.sample().extract()?;

        Ok(nal_units)
    }
}
