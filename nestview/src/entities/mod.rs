mod container;
mod piece;
mod preset;
mod request;
mod result;
mod session;
mod warning;

#[doc(inline)]
pub use container::Container;
#[doc(inline)]
pub use piece::Piece;
#[doc(inline)]
pub use preset::{PRESETS, Preset, PresetCategory};
#[doc(inline)]
pub use request::{NestingRequest, RequestError, RotationConfig, Strategy, UnknownStrategy};
#[doc(inline)]
pub use result::{BinResult, PlacedPiece, PlacementResult, Summary, split_copy_id};
#[doc(inline)]
pub use session::{RequestToken, Session, SessionError};
#[doc(inline)]
pub use warning::Warning;
