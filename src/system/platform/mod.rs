use super::snapshot::BatteryReading;

pub trait PlatformExtensions {
    fn battery() -> impl Future<Output = Option<BatteryReading>>;
    fn has_native_sensors() -> bool;
    fn default_temperature_helper() -> Option<&'static str>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod other;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use other as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub async fn battery() -> Option<BatteryReading> {
    platform_impl::Platform::battery().await
}

pub fn has_native_sensors() -> bool {
    platform_impl::Platform::has_native_sensors()
}

pub fn default_temperature_helper() -> Option<&'static str> {
    platform_impl::Platform::default_temperature_helper()
}
