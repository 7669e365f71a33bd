use windows_sys::Win32::System::Power::{GetSystemPowerStatus, SYSTEM_POWER_STATUS};

use super::PlatformExtensions;
use crate::system::snapshot::BatteryReading;

pub struct Platform;

// BatteryFlag bits, see SYSTEM_POWER_STATUS.
const NO_SYSTEM_BATTERY: u8 = 128;
const UNKNOWN_STATUS: u8 = 255;

impl PlatformExtensions for Platform {
    async fn battery() -> Option<BatteryReading> {
        let mut status = unsafe { std::mem::zeroed::<SYSTEM_POWER_STATUS>() };
        let ok = unsafe { GetSystemPowerStatus(&mut status) };
        if ok == 0 {
            return None;
        }
        from_power_status(status.ACLineStatus, status.BatteryFlag, status.BatteryLifePercent)
    }

    fn has_native_sensors() -> bool {
        true
    }

    fn default_temperature_helper() -> Option<&'static str> {
        None
    }
}

fn from_power_status(ac_line: u8, flags: u8, life_percent: u8) -> Option<BatteryReading> {
    if flags == UNKNOWN_STATUS || flags & NO_SYSTEM_BATTERY != 0 || life_percent == UNKNOWN_STATUS
    {
        return None;
    }
    Some(BatteryReading {
        percent: f32::from(life_percent.min(100)),
        is_charging: ac_line == 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_system_battery_flag() {
        assert!(from_power_status(1, NO_SYSTEM_BATTERY, UNKNOWN_STATUS).is_none());
    }

    #[test]
    fn reads_level_and_ac_line() {
        let reading = from_power_status(0, 0, 42).unwrap();
        assert_eq!(reading.percent, 42.0);
        assert!(!reading.is_charging);
    }
}
