// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! In-memory [`Chain`] for tests.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Mutex,
};

use starknet::core::{types::Felt, utils::starknet_keccak};

use super::{
    chain::{Chain, DeclareVersion, SubmittedDeploy, TxStatus},
    DeploymentError,
};
use crate::core::artifacts::ArtifactPair;

/// Arguments of one `deploy` call.
#[derive(Clone, Debug)]
pub struct DeployCall {
    pub class_hash: Felt,
    pub salt: Felt,
    pub calldata: Vec<Felt>,
    pub unique: bool,
}

#[derive(Default)]
struct State {
    declared: HashSet<Felt>,
    declares: Vec<DeclareVersion>,
    deploys: Vec<DeployCall>,
    statuses: HashMap<Felt, VecDeque<TxStatus>>,
    status_polls: usize,
    next_hash: u64,
}

/// Records every call and answers from scripted transaction statuses.
///
/// Class hashes are the keccak of the Sierra JSON; a Sierra class containing an `"invalid"`
/// field cannot be hashed.
pub struct MockChain {
    state: Mutex<State>,
    refused: Vec<DeclareVersion>,
    default_status: TxStatus,
    deploy_status: Option<TxStatus>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            state: Mutex::default(),
            refused: Vec::new(),
            default_status: TxStatus::Accepted,
            deploy_status: None,
        }
    }
}

impl MockChain {
    /// Answers `declare` with `UnsupportedVersion` for `version`.
    pub fn refusing(mut self, version: DeclareVersion) -> Self {
        self.refused.push(version);
        self
    }

    /// Status of every transaction without a script.
    pub fn with_default_status(mut self, status: TxStatus) -> Self {
        self.default_status = status;
        self
    }

    /// Status of every deploy transaction.
    pub fn with_deploy_status(mut self, status: TxStatus) -> Self {
        self.deploy_status = Some(status);
        self
    }

    /// Statuses reported for `hash`, one per poll; the last one repeats.
    pub fn script_status(&self, hash: Felt, statuses: &[TxStatus]) {
        self.state
            .lock()
            .unwrap()
            .statuses
            .insert(hash, statuses.iter().copied().collect());
    }

    pub fn mark_declared(&self, class_hash: Felt) {
        self.state.lock().unwrap().declared.insert(class_hash);
    }

    pub fn declares(&self) -> Vec<DeclareVersion> {
        self.state.lock().unwrap().declares.clone()
    }

    pub fn deploys(&self) -> Vec<DeployCall> {
        self.state.lock().unwrap().deploys.clone()
    }

    pub fn status_polls(&self) -> usize {
        self.state.lock().unwrap().status_polls
    }

    fn next_hash(state: &mut State) -> Felt {
        state.next_hash += 1;
        Felt::from(0x1000 + state.next_hash)
    }
}

impl Chain for MockChain {
    fn class_hash(&self, pair: &ArtifactPair) -> Result<Felt, DeploymentError> {
        if pair.high_level.get("invalid").is_some() {
            return Err(DeploymentError::InvalidClass("invalid sierra class".into()));
        }
        Ok(starknet_keccak(pair.high_level.to_string().as_bytes()))
    }

    async fn is_declared(&self, class_hash: Felt) -> Result<bool, DeploymentError> {
        Ok(self.state.lock().unwrap().declared.contains(&class_hash))
    }

    async fn declare(
        &self,
        pair: &ArtifactPair,
        version: DeclareVersion,
    ) -> Result<Felt, DeploymentError> {
        let class_hash = self.class_hash(pair)?;
        let mut state = self.state.lock().unwrap();
        state.declares.push(version);
        if self.refused.contains(&version) {
            return Err(DeploymentError::UnsupportedVersion(version));
        }
        state.declared.insert(class_hash);
        Ok(Self::next_hash(&mut state))
    }

    async fn deploy(
        &self,
        class_hash: Felt,
        salt: Felt,
        constructor_calldata: Vec<Felt>,
        unique: bool,
    ) -> Result<SubmittedDeploy, DeploymentError> {
        let mut state = self.state.lock().unwrap();
        state.deploys.push(DeployCall {
            class_hash,
            salt,
            calldata: constructor_calldata,
            unique,
        });
        let transaction_hash = Self::next_hash(&mut state);
        if let Some(status) = self.deploy_status {
            state
                .statuses
                .insert(transaction_hash, VecDeque::from([status]));
        }
        Ok(SubmittedDeploy {
            address: starknet_keccak(&salt.to_bytes_be()),
            transaction_hash,
        })
    }

    async fn transaction_status(
        &self,
        transaction_hash: Felt,
    ) -> Result<TxStatus, DeploymentError> {
        let mut state = self.state.lock().unwrap();
        state.status_polls += 1;
        let status = match state.statuses.get_mut(&transaction_hash) {
            Some(script) if script.len() > 1 => script.pop_front(),
            Some(script) => script.front().copied(),
            None => None,
        };
        Ok(status.unwrap_or(self.default_status))
    }
}
