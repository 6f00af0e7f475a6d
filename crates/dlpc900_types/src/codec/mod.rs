//! Binary pattern codec: length varints, 24-plane combine/split, and the
//! ERLE/RLE run-length formats used to compress DMD pattern uploads.

mod decode;
mod erle;
mod error;
mod length;
mod planes;
mod rle;

pub use decode::decode;
pub use erle::{encode_erle, EncodedPattern};
pub use error::CodecError;
pub use length::{bytes_to_len_long, bytes_to_len_short, is_long_form, len_to_bytes, MAX_LENGTH};
pub use planes::{combine, split, BinaryPattern, CombinedFrame};
pub use rle::encode_rle;
