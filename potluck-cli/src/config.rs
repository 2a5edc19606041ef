use std::{env, str::FromStr};

use potluck_application::ParticipantScope;
use potluck_domain::{Money, RoundingMode, SettlementContext, SettlementContextError};
use thiserror::Error;

const SCALE_KEY: &str = "POTLUCK_SCALE";
const ROUNDING_KEY: &str = "POTLUCK_ROUNDING";
const TOLERANCE_KEY: &str = "POTLUCK_TOLERANCE";
const SCOPE_KEY: &str = "POTLUCK_SCOPE";
const OUTPUT_KEY: &str = "POTLUCK_OUTPUT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value '{value}': expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error(transparent)]
    Context(#[from] SettlementContextError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub context: SettlementContext,
    pub scope: ParticipantScope,
    pub output: OutputFormat,
}

impl CliConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let scale: u32 = parse_or(&lookup, SCALE_KEY, 2, "a non-negative integer")?;

        let rounding_mode = match lookup(ROUNDING_KEY).as_deref().map(str::trim) {
            None | Some("half-up") => RoundingMode::HalfUp,
            Some("half-even") => RoundingMode::HalfEven,
            Some(other) => return Err(invalid(ROUNDING_KEY, other, "half-up or half-even")),
        };

        let context = match lookup(TOLERANCE_KEY) {
            None => SettlementContext::with_scale(scale, rounding_mode)?,
            Some(raw) => {
                let tolerance = Money::from_str(&raw)
                    .map_err(|_| invalid(TOLERANCE_KEY, &raw, "a decimal amount"))?;
                SettlementContext::new(scale, rounding_mode, tolerance)?
            }
        };

        let scope = match lookup(SCOPE_KEY).as_deref().map(str::trim) {
            None | Some("all") => ParticipantScope::AllInvitees,
            Some("accepted") => ParticipantScope::AcceptedOnly,
            Some(other) => return Err(invalid(SCOPE_KEY, other, "all or accepted")),
        };

        let output = match lookup(OUTPUT_KEY).as_deref().map(str::trim) {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => return Err(invalid(OUTPUT_KEY, other, "text or json")),
        };

        tracing::debug!(
            scale = context.scale(),
            rounding_mode = ?context.rounding_mode(),
            tolerance = %context.tolerance(),
            scope = ?scope,
            output = ?output,
            "Configuration loaded"
        );

        Ok(Self {
            context,
            scope,
            output,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| invalid(key, &raw, expected)),
    }
}

fn invalid(key: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_cents() {
        let config = config(&[]).expect("defaults are valid");

        assert_eq!(config.context, SettlementContext::cents());
        assert_eq!(config.scope, ParticipantScope::AllInvitees);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn reads_every_key() {
        let config = config(&[
            (SCALE_KEY, "0"),
            (ROUNDING_KEY, "half-even"),
            (TOLERANCE_KEY, "1"),
            (SCOPE_KEY, "accepted"),
            (OUTPUT_KEY, "json"),
        ])
        .expect("valid config");

        assert_eq!(config.context.scale(), 0);
        assert_eq!(config.context.rounding_mode(), RoundingMode::HalfEven);
        assert_eq!(config.context.tolerance(), Money::from_i64(1));
        assert_eq!(config.scope, ParticipantScope::AcceptedOnly);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[rstest]
    #[case::scale(SCALE_KEY, "two")]
    #[case::rounding(ROUNDING_KEY, "up")]
    #[case::tolerance(TOLERANCE_KEY, "a bit")]
    #[case::scope(SCOPE_KEY, "everyone")]
    #[case::output(OUTPUT_KEY, "yaml")]
    fn rejects_invalid_values(#[case] key: &'static str, #[case] value: &str) {
        assert!(matches!(
            config(&[(key, value)]),
            Err(ConfigError::Invalid { key: k, .. }) if k == key
        ));
    }

    #[rstest]
    #[case::above_max("23", 23)]
    #[case::decimal_precision("28", 28)]
    #[case::beyond_precision("40", 40)]
    #[case::largest("4294967295", u32::MAX)]
    fn rejects_unsupported_scale(#[case] raw: &str, #[case] expected: u32) {
        assert!(matches!(
            config(&[(SCALE_KEY, raw)]),
            Err(ConfigError::Context(
                SettlementContextError::UnsupportedScale { scale, .. }
            )) if scale == expected
        ));
    }
}
