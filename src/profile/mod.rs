pub mod name;
pub mod properties;
pub mod reader;

use std::collections::BTreeMap;

pub use name::{DEVICE_FILE_PREFIX, DEVICE_FILE_SUFFIX, filename_valid};
pub use properties::{PropertyBag, USER_READABLE_NAME};

/// Profile filename to display name.
pub type DeviceIndex = BTreeMap<String, String>;
