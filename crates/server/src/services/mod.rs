//! Business services that sit between routes and the store.

pub mod uploads;

pub use uploads::{FsImageStore, ImageStore, UploadError, UploadKind};
