mod length_size;
mod nal_unit;

pub use length_size::{InvalidLengthSize, LengthSize};
pub use nal_unit::NalUnit;
