pub mod boundary;
pub mod ellipsoid;
pub mod error;
pub mod math;
pub mod primitive;
pub mod render;
pub mod tessellation;

pub use error::{GeoprimError, Result};
