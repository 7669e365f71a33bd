use std::time::Duration;

use tracing::debug;

use super::command::stdout_within;
use super::platform;
use super::provider::MetricsProvider;
use super::snapshot::Temperatures;

pub const DEFAULT_HELPER_TIMEOUT: Duration = Duration::from_secs(2);

/// A named group of temperature readings as reported by the OS.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorGroup {
    pub name: String,
    pub readings: Vec<f32>,
}

/// How temperatures are sourced on this host. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorBackend {
    /// OS sensor list, with the helper as a CPU fallback when one is configured.
    NativeSensors,
    /// External helper only.
    HelperProcess,
    Unsupported,
}

impl SensorBackend {
    pub fn select(has_native_sensors: bool, has_helper: bool) -> Self {
        if has_native_sensors {
            SensorBackend::NativeSensors
        } else if has_helper {
            SensorBackend::HelperProcess
        } else {
            SensorBackend::Unsupported
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl HelperCommand {
    /// Split a configured command line on whitespace. No shell quoting.
    pub fn parse(command_line: &str, timeout: Duration) -> Option<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(HelperCommand {
            program,
            args: words.collect(),
            timeout,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TemperatureResolver {
    backend: SensorBackend,
    helper: Option<HelperCommand>,
}

impl TemperatureResolver {
    pub fn new(backend: SensorBackend, helper: Option<HelperCommand>) -> Self {
        TemperatureResolver { backend, helper }
    }

    /// Pick the backend for the running platform. `helper` overrides the
    /// platform's default helper program.
    pub fn detect(helper: Option<String>, timeout: Duration) -> Self {
        let helper = helper
            .or_else(|| platform::default_temperature_helper().map(str::to_string))
            .and_then(|line| HelperCommand::parse(&line, timeout));
        let backend = SensorBackend::select(platform::has_native_sensors(), helper.is_some());
        debug!(?backend, helper = ?helper.as_ref().map(|h| &h.program), "temperature backend selected");
        Self::new(backend, helper)
    }

    pub fn backend(&self) -> SensorBackend {
        self.backend
    }

    /// Never fails; an empty result is a normal outcome.
    pub async fn resolve<P: MetricsProvider + ?Sized>(&self, provider: &mut P) -> Temperatures {
        let mut temps = Temperatures::default();

        if self.backend == SensorBackend::NativeSensors {
            match provider.sensors() {
                Ok(groups) => temps = select_from_groups(&groups),
                Err(err) => debug!(%err, "native sensors yielded nothing"),
            }
        }

        if temps.cpu_celsius.is_none()
            && self.backend != SensorBackend::Unsupported
            && let Some(helper) = &self.helper
        {
            temps.cpu_celsius = run_helper(helper).await;
        }

        temps
    }
}

/// CPU from the first group named like `coretemp`/`cpu`, battery from the
/// first named like `battery`/`bat`. Groups without readings are skipped.
pub fn select_from_groups(groups: &[SensorGroup]) -> Temperatures {
    Temperatures {
        cpu_celsius: first_reading(groups, &["coretemp", "cpu"]),
        battery_celsius: first_reading(groups, &["battery", "bat"]),
    }
}

fn first_reading(groups: &[SensorGroup], needles: &[&str]) -> Option<f32> {
    groups
        .iter()
        .filter(|g| {
            let name = g.name.to_lowercase();
            needles.iter().any(|n| name.contains(n))
        })
        .find_map(|g| g.readings.first().copied())
}

async fn run_helper(helper: &HelperCommand) -> Option<f32> {
    let stdout = stdout_within(&helper.program, &helper.args, helper.timeout).await?;
    let parsed = parse_first_decimal(&stdout);
    if parsed.is_none() {
        debug!(program = %helper.program, "temperature helper printed no decimal");
    }
    parsed
}

/// First `<digits>.<digits>` run in `text`, e.g. `61.8` in `"61.8°C"`.
pub fn parse_first_decimal(text: &str) -> Option<f32> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
            let mut frac_end = end + 1;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            return text[start..frac_end].parse().ok();
        }
        start = end;
    }
    None
}
