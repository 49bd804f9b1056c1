pub const DEVICE_FILE_PREFIX: &str = "device-";
pub const DEVICE_FILE_SUFFIX: &str = ".properties";

/// Whether `filename` follows the `device-*.properties` convention.
pub fn filename_valid(filename: &str) -> bool {
    filename.starts_with(DEVICE_FILE_PREFIX)
        && filename.ends_with(DEVICE_FILE_SUFFIX)
}
