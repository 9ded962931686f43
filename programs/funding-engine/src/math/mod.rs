pub mod convert;
pub mod fixed_point;
pub mod signed;

pub use convert::PRECISION_GAP;
pub use fixed_point::{Fixed18, Fixed6, FixedPoint};
pub use signed::SignedU256;
