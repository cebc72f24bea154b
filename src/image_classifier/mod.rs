#[cfg(feature = "backend-tract")]
pub mod impl_tract_onnx;
pub mod impl_fake;
#[cfg(test)]
pub mod impl_scripted;
pub mod interface;
pub mod models;
pub mod ranking;
#[cfg(feature = "backend-tract")]
pub mod tract;
