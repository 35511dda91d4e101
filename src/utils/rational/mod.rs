mod conversion;
pub mod elementary;
mod rounding;

pub use conversion::{to_f64, FixedPoint};
pub use rounding::{exponent, RoundBinary};
