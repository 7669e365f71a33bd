use std::fs;
use std::path::Path;

use super::PlatformExtensions;
use crate::system::snapshot::BatteryReading;

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

pub struct Platform;

impl PlatformExtensions for Platform {
    async fn battery() -> Option<BatteryReading> {
        battery_from_dir(Path::new(POWER_SUPPLY_DIR))
    }

    fn has_native_sensors() -> bool {
        true
    }

    fn default_temperature_helper() -> Option<&'static str> {
        None
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

/// Scan `/sys/class/power_supply`: the first `Battery` entry gives the level,
/// any online `Mains` entry means the charger is plugged in. Without a mains
/// entry, fall back to the battery's own status string.
fn battery_from_dir(dir: &Path) -> Option<BatteryReading> {
    let mut entries: Vec<_> = fs::read_dir(dir).ok()?.flatten().map(|e| e.path()).collect();
    entries.sort();

    let mut battery: Option<(f32, Option<String>)> = None;
    let mut mains_online: Option<bool> = None;

    for entry in entries {
        match read_trimmed(&entry.join("type")).as_deref() {
            Some("Battery") if battery.is_none() => {
                // capacity may be missing on some firmware; energy_now/full is the fallback
                let percent = read_trimmed(&entry.join("capacity"))
                    .and_then(|c| c.parse::<f32>().ok())
                    .or_else(|| {
                        let now: f32 = read_trimmed(&entry.join("energy_now"))?.parse().ok()?;
                        let full: f32 = read_trimmed(&entry.join("energy_full"))?.parse().ok()?;
                        (full > 0.0).then(|| now / full * 100.0)
                    });
                if let Some(percent) = percent {
                    battery = Some((percent, read_trimmed(&entry.join("status"))));
                }
            }
            Some("Mains") => {
                let online = read_trimmed(&entry.join("online")).as_deref() == Some("1");
                mains_online = Some(mains_online.unwrap_or(false) || online);
            }
            _ => {}
        }
    }

    let (percent, status) = battery?;
    let is_charging = mains_online.unwrap_or_else(|| status_means_plugged(status.as_deref()));
    Some(BatteryReading {
        percent: percent.clamp(0.0, 100.0),
        is_charging,
    })
}

fn status_means_plugged(status: Option<&str>) -> bool {
    matches!(status, Some("Charging" | "Full" | "Not charging"))
}
