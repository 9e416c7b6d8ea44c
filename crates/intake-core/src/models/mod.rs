//! Data models for the registration flow
//!
//! Raw form input, the validated record it turns into, and the CV attachment
//! with the constraint set both validation layers share.

mod attachment;
mod field;
mod registration;

pub use attachment::*;
pub use field::*;
pub use registration::*;
