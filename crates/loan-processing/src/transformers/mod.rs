//! Fitted transforms.
//!
//! Each transform is a plain owned struct holding its fit parameters:
//! - [`StandardScaler`]: zero-mean/unit-variance scaling of numeric columns
//! - [`LabelEncoder`]: integer codes for the distinct values of one column

mod label_encoder;
mod standard_scaler;

pub use label_encoder::LabelEncoder;
pub use standard_scaler::StandardScaler;
