//! Measurement platform hostname parsing.
//!
//! Two naming schemes are in use:
//!
//! - v1: `mlab1.abc01.measurement-lab.org`
//! - v2: `mlab1-abc01.project.measurement-lab.org`
//!
//! Patterns are compiled once on first use and shared for the life of the
//! process.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^mlab[1-4]([.-])").expect("valid hostname prefix pattern"));
static V1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(mlab[1-4])\.([a-z]{3}[0-9tc]{2})\.(measurement-lab\.org)$")
        .expect("valid v1 hostname pattern")
});
static V2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(mlab[1-4])-([a-z]{3}[0-9tc]{2})\.(.*?)\.(measurement-lab\.org)$")
        .expect("valid v2 hostname pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostnameError {
    #[error("Invalid hostname: {0}")]
    Invalid(String),
    #[error("Invalid v1 hostname: {0}")]
    InvalidV1(String),
    #[error("Invalid v2 hostname: {0}")]
    InvalidV2(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hostname {
    hostname: String,
    machine: String,
    site: String,
    project: String,
    domain: String,
    version: String,
}

impl Hostname {
    pub fn parse(name: &str) -> Result<Self, HostnameError> {
        let separator = PREFIX
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| HostnameError::Invalid(name.to_string()))?;

        if separator == "-" {
            let caps = V2
                .captures(name)
                .ok_or_else(|| HostnameError::InvalidV2(name.to_string()))?;
            Ok(Self {
                hostname: caps[0].to_string(),
                machine: caps[1].to_string(),
                site: caps[2].to_string(),
                project: caps[3].to_string(),
                domain: caps[4].to_string(),
                version: "v2".to_string(),
            })
        } else {
            let caps = V1
                .captures(name)
                .ok_or_else(|| HostnameError::InvalidV1(name.to_string()))?;
            Ok(Self {
                hostname: caps[0].to_string(),
                machine: caps[1].to_string(),
                site: caps[2].to_string(),
                project: String::new(),
                domain: caps[3].to_string(),
                version: "v1".to_string(),
            })
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn machine(&self) -> &str {
        &self.machine
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// Empty for v1 names, which carry no project component.
    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hostname)
    }
}
