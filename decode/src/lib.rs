//! Splits length-prefixed samples, as stored in ISO-BMFF files carrying AVC or HEVC video, into
//! their NAL units.

mod decoder;
mod errors;
mod sample;

pub use common::{InvalidLengthSize, LengthSize, NalUnit};
pub use decoder::SampleDecoder;
pub use errors::{DecodingError, SampleError};
pub use sample::{extract, extract_four, NalUnits, Sample};
