use std::io;

use common::{InvalidLengthSize, LengthSize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("invalid sample configuration: {0}")]
    InvalidConfiguration(#[from] InvalidLengthSize),

    #[error(
        "NAL unit length {declared_length} exceeds remaining sample size {available} at position {offset}"
    )]
    TruncatedNalu {
        declared_length: usize,
        available: usize,
        offset: usize,
    },

    #[error("sample size {len} is less than NAL unit length size {length_size}")]
    SampleTooShort { len: usize, length_size: LengthSize },

    #[error("{remaining} trailing bytes left after the last NAL unit at position {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
}

#[derive(Error, Debug)]
pub enum DecodingError {
    #[error("An error occurred when opening the file")]
    FileError(#[from] io::Error),

    #[error("An error occurred reading NAL units from the sample")]
    SampleError(#[from] SampleError),
}
