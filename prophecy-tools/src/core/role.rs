// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of contracts deployed for Prophecy Sunya.
///
/// Serializes to the key used in the deployment manifest read by the frontend.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum ContractRole {
    Prediction,
    Nft,
    #[value(alias = "gas_tank")]
    GasTank,
    Oracle,
    Governance,
    Bridge,
}

impl ContractRole {
    /// All roles, in deployment order.
    pub const ALL: [ContractRole; 6] = [
        ContractRole::Prediction,
        ContractRole::Nft,
        ContractRole::GasTank,
        ContractRole::Oracle,
        ContractRole::Governance,
        ContractRole::Bridge,
    ];

    /// Name used when matching against compiled contract keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Prediction => "prediction",
            Self::Nft => "nft",
            Self::GasTank => "gas_tank",
            Self::Oracle => "oracle",
            Self::Governance => "governance",
            Self::Bridge => "bridge",
        }
    }

    /// Human readable label for log output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Prediction => "Prediction",
            Self::Nft => "NFT",
            Self::GasTank => "Gas Tank",
            Self::Oracle => "Oracle",
            Self::Governance => "Governance",
            Self::Bridge => "Bridge",
        }
    }
}

impl fmt::Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
