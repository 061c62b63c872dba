//! Configuration loading and resolution.
//!
//! Two host defaults feed the matchers: the zone applied to instant-like
//! values when a caller gives none, and the locale used for diagnostics.
//! Each resolves explicit value > environment > built-in default. The zone
//! additionally consults the host system zone (`/etc/localtime`, the Windows
//! registry, ...) before falling back to UTC.

use chrono::Locale;

use crate::error::{MatcherError, Result};
use crate::zone::Zone;

/// Environment variable overriding the host system zone.
pub const ZONE_ENV: &str = "TZ";

/// Environment variables consulted for the host locale, in priority order.
pub const LOCALE_ENV: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// Host defaults for zone and locale.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    default_zone: Zone,
    locale: Locale,
}

impl Default for MatcherConfig {
    /// UTC and the POSIX locale, without consulting the environment.
    fn default() -> Self {
        Self {
            default_zone: Zone::utc(),
            locale: Locale::POSIX,
        }
    }
}

impl MatcherConfig {
    /// Resolve both defaults from the environment and the host system zone.
    pub fn from_env() -> Self {
        let zone = std::env::var(ZONE_ENV).ok();
        let locales: Vec<String> = LOCALE_ENV
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .collect();
        Self {
            default_zone: resolve_host_zone(zone.as_deref(), system_zone_name),
            locale: locale_from_env_values(locales.iter().map(String::as_str)),
        }
    }

    /// Resolve with explicit overrides. An explicit value that does not parse
    /// is an error; an unparseable environment value is ignored.
    pub fn resolve(zone: Option<&str>, locale: Option<&str>) -> Result<Self> {
        let mut config = Self::from_env();
        if let Some(zone) = zone {
            config.default_zone = zone.parse()?;
        }
        if let Some(locale) = locale {
            config.locale = parse_locale(locale)?;
        }
        tracing::debug!(
            zone = %config.default_zone,
            locale = ?config.locale,
            "resolved matcher configuration"
        );
        Ok(config)
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.default_zone = zone;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_locale_name(self, name: &str) -> Result<Self> {
        Ok(self.with_locale(parse_locale(name)?))
    }

    pub fn default_zone(&self) -> &Zone {
        &self.default_zone
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

/// Parse a POSIX-style locale name such as `en_US.UTF-8` or `de_DE@euro`.
pub fn parse_locale(name: &str) -> Result<Locale> {
    let base = name
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    match base {
        "" | "C" | "POSIX" => Ok(Locale::POSIX),
        _ => Locale::try_from(base).map_err(|_| MatcherError::InvalidLocale(format!("'{name}'"))),
    }
}

/// `TZ` when set and valid, else the system zone, else UTC.
fn resolve_host_zone(
    env_value: Option<&str>,
    system_name: impl FnOnce() -> Option<String>,
) -> Zone {
    if let Some(zone) = zone_from_env_value(env_value) {
        return zone;
    }
    let Some(name) = system_name() else {
        return Zone::utc();
    };
    match name.parse::<Zone>() {
        Ok(zone) => zone,
        Err(e) => {
            tracing::warn!("Ignoring system zone {name}: {e}");
            Zone::utc()
        }
    }
}

fn system_zone_name() -> Option<String> {
    match iana_time_zone::get_timezone() {
        Ok(name) => Some(name),
        Err(e) => {
            tracing::debug!("System zone unavailable: {e}");
            None
        }
    }
}

fn zone_from_env_value(value: Option<&str>) -> Option<Zone> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;

    // TZ may be ":Area/City" or a path into a zoneinfo directory
    let name = raw.trim_start_matches(':');
    let name = name
        .split_once("zoneinfo/")
        .map(|(_, tail)| tail)
        .unwrap_or(name);

    match name.parse::<Zone>() {
        Ok(zone) => Some(zone),
        Err(e) => {
            tracing::warn!("Ignoring {ZONE_ENV}={raw}: {e}");
            None
        }
    }
}

fn locale_from_env_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Locale {
    for value in values {
        if value.trim().is_empty() {
            continue;
        }
        match parse_locale(value) {
            Ok(locale) => return locale,
            Err(e) => tracing::warn!("Ignoring locale '{value}': {e}"),
        }
    }
    Locale::POSIX
}
