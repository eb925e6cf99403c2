/// Tracks library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved event name for alias events linking an anonymous identity to an
/// authenticated one.
pub const ALIAS_EVENT_NAME: &str = "_aliasUser";

/// Prefix applied to every attribute produced by `DeviceInformation`.
pub const DEVICE_INFO_PREFIX: &str = "device_info_";
