use std::{
    collections::{BTreeMap, btree_map::Entry},
    path::PathBuf,
};

use crate::error::ConfigError;

/// Settings for one run, fixed at startup and only read afterwards
#[derive(Debug, Clone)]
pub struct SessionParameters {
    /// Profile in the shared credentials file holding the root credentials
    pub source_profile: String,
    /// Shared credentials file the source profile is read from
    pub source_path: PathBuf,
    pub region: String,
    pub mfa_serial: String,
    pub duration_hours: i64,
    /// File the issued profile blocks are appended to
    pub output_path: PathBuf,
}

impl SessionParameters {
    /// Reject settings that can never produce a valid exchange
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_profile.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "session-profile",
            });
        }
        if self.mfa_serial.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "mfa-serial",
            });
        }
        if self.duration_hours <= 0 {
            return Err(ConfigError::NonPositiveDuration {
                hours: self.duration_hours,
            });
        }
        Ok(())
    }
}

/// Profile name to role ARN mapping requested for one run.
///
/// Iterates in ascending profile-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubProfiles(BTreeMap<String, String>);

impl SubProfiles {
    /// Build from (profile, role ARN) pairs, rejecting empty and duplicate names
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut profiles = BTreeMap::new();

        for (profile, role_arn) in pairs {
            let (profile, role_arn): (String, String) = (profile.into(), role_arn.into());
            let (profile, role_arn) = (profile.trim().to_string(), role_arn.trim().to_string());

            if profile.is_empty() || role_arn.is_empty() {
                return Err(ConfigError::MalformedSubProfile {
                    entry: format!("{profile}={role_arn}"),
                });
            }

            match profiles.entry(profile) {
                Entry::Occupied(entry) => {
                    return Err(ConfigError::DuplicateSubProfile {
                        profile: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(role_arn);
                }
            }
        }

        if profiles.is_empty() {
            return Err(ConfigError::NoSubProfiles);
        }

        Ok(Self(profiles))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// (profile, role ARN) pairs in processing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse one `NAME=ROLE_ARN` command-line entry
pub fn parse_sub_profile(entry: &str) -> Result<(String, String), ConfigError> {
    let (profile, role_arn) = entry
        .split_once('=')
        .ok_or_else(|| ConfigError::MalformedSubProfile {
            entry: entry.to_string(),
        })?;

    let (profile, role_arn) = (profile.trim(), role_arn.trim());
    if profile.is_empty() || role_arn.is_empty() {
        return Err(ConfigError::MalformedSubProfile {
            entry: entry.to_string(),
        });
    }

    Ok((profile.to_string(), role_arn.to_string()))
}
