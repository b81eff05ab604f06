// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! Mapping of contract roles to build manifest keys.
//!
//! Manifest keys depend on package and module names that have changed between builds, so each
//! role carries a list of aliases and an ordered list of [`Matcher`]s. Adding an alias or a
//! role is a change to [`RESOLUTION_TABLE`], not to the matching code.

use std::fmt;

use regex::RegexBuilder;

use crate::core::{
    artifacts::{BuildManifest, ContractKey},
    role::ContractRole,
};

/// A strategy for picking a manifest key for a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matcher {
    /// A key equal to one of the aliases.
    Exact,
    /// A key containing one of the aliases, ignoring case.
    Substring,
    /// A key containing `<role>::`, ignoring case.
    ModulePath,
    /// A key with a `_`/`:` separated token that contains or is contained in the role name.
    TokenOverlap,
    /// The first key of the manifest, whatever it is.
    FirstAvailable,
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::Substring => "substring",
            Self::ModulePath => "module path",
            Self::TokenOverlap => "token overlap",
            Self::FirstAvailable => "first available",
        };
        f.write_str(name)
    }
}

/// Aliases and matchers for one role.
#[derive(Debug)]
pub struct Resolution {
    pub role: ContractRole,
    pub aliases: &'static [&'static str],
    pub matchers: &'static [Matcher],
}

const STANDARD: &[Matcher] = &[
    Matcher::Exact,
    Matcher::Substring,
    Matcher::ModulePath,
    Matcher::TokenOverlap,
];

// Prediction was the first contract brought up on devnet and any manifest is accepted for it.
// No other role falls back to an arbitrary key.
const PRIMARY: &[Matcher] = &[
    Matcher::Exact,
    Matcher::Substring,
    Matcher::ModulePath,
    Matcher::TokenOverlap,
    Matcher::FirstAvailable,
];

pub const RESOLUTION_TABLE: &[Resolution] = &[
    Resolution {
        role: ContractRole::Prediction,
        aliases: &[
            "prediction",
            "prophecy_sunya_prediction",
            "prophecy_sunya::prediction",
        ],
        matchers: PRIMARY,
    },
    Resolution {
        role: ContractRole::Nft,
        aliases: &["nft", "prophecy_sunya_nft"],
        matchers: STANDARD,
    },
    Resolution {
        role: ContractRole::GasTank,
        aliases: &["gas_tank", "gastank", "prophecy_sunya_gas_tank"],
        matchers: STANDARD,
    },
    Resolution {
        role: ContractRole::Oracle,
        aliases: &["oracle", "prophecy_sunya_oracle"],
        matchers: STANDARD,
    },
    Resolution {
        role: ContractRole::Governance,
        aliases: &["governance", "prophecy_sunya_governance"],
        matchers: STANDARD,
    },
    Resolution {
        role: ContractRole::Bridge,
        aliases: &["bridge", "prophecy_sunya_bridge"],
        matchers: STANDARD,
    },
];

/// Looks up the resolution entry of a role.
pub fn resolution(role: ContractRole) -> &'static Resolution {
    RESOLUTION_TABLE
        .iter()
        .find(|entry| entry.role == role)
        .unwrap_or_else(|| unreachable!("every role has a resolution entry"))
}

/// Finds the manifest key for `role`; `None` means the role is skipped.
pub fn resolve_key(role: ContractRole, manifest: &BuildManifest) -> Option<ContractKey> {
    resolve_with_matcher(role, manifest).map(|(key, _)| key)
}

/// Like [`resolve_key`], also reporting which matcher succeeded.
pub fn resolve_with_matcher(
    role: ContractRole,
    manifest: &BuildManifest,
) -> Option<(ContractKey, Matcher)> {
    let entry = resolution(role);
    let keys: Vec<&str> = manifest.keys().collect();
    entry.matchers.iter().find_map(|matcher| {
        let key = find(*matcher, entry, &keys)?;
        debug!(@grey, "Resolved {role} to {key:?} by {matcher} match");
        Some((key.to_owned(), *matcher))
    })
}

fn find<'a>(matcher: Matcher, entry: &Resolution, keys: &[&'a str]) -> Option<&'a str> {
    let role = entry.role.name();
    let found = match matcher {
        Matcher::Exact => keys
            .iter()
            .find(|key| entry.aliases.iter().any(|alias| *alias == **key)),
        Matcher::Substring => keys.iter().find(|key| {
            let key = key.to_lowercase();
            entry
                .aliases
                .iter()
                .any(|alias| key.contains(&alias.to_lowercase()))
        }),
        Matcher::ModulePath => {
            let pattern = RegexBuilder::new(&format!("{}::", regex::escape(role)))
                .case_insensitive(true)
                .build()
                .ok()?;
            keys.iter().find(|key| pattern.is_match(key))
        }
        Matcher::TokenOverlap => keys.iter().find(|key| {
            key.to_lowercase()
                .split(['_', ':'])
                .filter(|token| !token.is_empty())
                .any(|token| role.contains(token) || token.contains(role))
        }),
        Matcher::FirstAvailable => keys.first(),
    };
    found.copied()
}
