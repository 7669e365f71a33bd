use super::PlatformExtensions;
use crate::system::snapshot::BatteryReading;

pub struct Platform;

impl PlatformExtensions for Platform {
    async fn battery() -> Option<BatteryReading> {
        None
    }

    fn has_native_sensors() -> bool {
        false
    }

    fn default_temperature_helper() -> Option<&'static str> {
        None
    }
}
