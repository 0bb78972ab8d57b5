use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration blocks with built-in support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Interface,
    IpPool,
    Vip,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Interface,
        SectionKind::IpPool,
        SectionKind::Vip,
    ];

    /// Line that opens the block in a configuration export.
    pub fn marker(self) -> &'static str {
        match self {
            SectionKind::Interface => "config system interface",
            SectionKind::IpPool => "config firewall ippool",
            SectionKind::Vip => "config firewall vip",
        }
    }

    /// Short name used on the command line and in catalogues.
    pub fn slug(self) -> &'static str {
        match self {
            SectionKind::Interface => "interface",
            SectionKind::IpPool => "ippool",
            SectionKind::Vip => "vip",
        }
    }

    /// Output file written when the caller does not pick one.
    pub fn default_output(self) -> &'static str {
        match self {
            SectionKind::Interface => "interfaces-out.csv",
            SectionKind::IpPool => "ippools-out.csv",
            SectionKind::Vip => "vip-out.csv",
        }
    }

    pub fn spec(self) -> SectionSpec {
        SectionSpec {
            name: self.slug().to_string(),
            marker: self.marker().to_string(),
            output: self.default_output().to_string(),
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a section name is not one of the built-in kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section '{0}' (expected interface, ippool or vip)")]
pub struct UnknownSection(pub String);

impl FromStr for SectionKind {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Data-driven description of an extractable block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Lookup name, e.g. `interface`.
    pub name: String,
    /// Opening line, e.g. `config system interface`.
    pub marker: String,
    /// Default CSV file name.
    pub output: String,
}

impl From<SectionKind> for SectionSpec {
    fn from(kind: SectionKind) -> Self {
        kind.spec()
    }
}
