// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

pub use deploy::{deploy, deploy_roles, DeploymentReport, RoleError, RoleFailure};
pub use resolve::{resolve, Resolution, ResolvedRole};

mod deploy;
mod resolve;
