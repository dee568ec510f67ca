//! Photo API parameters
//!
//! The declared parameter catalog for the photo API and a typed view of a
//! resolved snapshot for the services that consume it.

use crate::config::loader::ConfigLoader;
use crate::config::snapshot::ConfigSnapshot;
use crate::config::spec::ParameterSpec;
use crate::env::EnvSource;
use crate::error::{ApiEnvError, Result};
use serde::Serialize;

pub const NODE_ENV: &str = "NODE_ENV";
pub const PORT: &str = "PORT";
pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const PHOTOS_BUCKET: &str = "PHOTOS_BUCKET";
pub const DEFAULT_AWS_REGION: &str = "DEFAULT_AWS_REGION";
pub const SHOW_WARNINGS: &str = "SHOW_WARNINGS";
pub const SHOW_ADMIN_TOOLS: &str = "SHOW_ADMIN_TOOLS";
pub const TABLE_NAME: &str = "TABLE_NAME";

/// Parameters read by the photo API, in declaration order
pub fn api_parameters() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::string(NODE_ENV)
            .describe("Deployment environment name")
            .build(),
        ParameterSpec::string(PORT)
            .describe("HTTP listen port")
            .build(),
        ParameterSpec::string(AWS_PROFILE)
            .describe("AWS credentials profile")
            .build(),
        ParameterSpec::string(PHOTOS_BUCKET)
            .describe("S3 bucket holding photo objects")
            .build(),
        ParameterSpec::string(DEFAULT_AWS_REGION)
            .describe("AWS region for service clients")
            .build(),
        ParameterSpec::integer(SHOW_WARNINGS)
            .with_default(1)
            .describe("Emit warnings (non-zero enables)")
            .build(),
        ParameterSpec::integer(SHOW_ADMIN_TOOLS)
            .with_default(0)
            .describe("Expose admin tooling (non-zero enables)")
            .build(),
        ParameterSpec::string(TABLE_NAME)
            .describe("DynamoDB table for photo metadata")
            .build(),
    ]
}

/// Typed photo API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSettings {
    pub node_env: Option<String>,
    pub port: Option<String>,
    pub aws_profile: Option<String>,
    pub photos_bucket: Option<String>,
    pub default_aws_region: Option<String>,
    pub show_warnings: i64,
    pub show_admin_tools: i64,
    pub table_name: Option<String>,
}

impl ApiSettings {
    /// Load the photo API parameters and convert them in one step
    pub fn load<E: EnvSource + ?Sized>(env: &E) -> Result<Self> {
        let snapshot = ConfigLoader::load(&api_parameters(), env)?;
        Self::from_snapshot(&snapshot)
    }

    /// Typed view of a snapshot resolved from [`api_parameters`]
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Result<Self> {
        let string = |name: &str| -> Result<Option<String>> {
            Ok(snapshot.get_str(name)?.map(str::to_string))
        };
        // Flag defaults live in the catalog; a snapshot without them is not one
        // resolved from `api_parameters`
        let flag = |name: &str| -> Result<i64> {
            snapshot
                .get_int(name)?
                .ok_or_else(|| ApiEnvError::missing_required(name))
        };

        Ok(Self {
            node_env: string(NODE_ENV)?,
            port: string(PORT)?,
            aws_profile: string(AWS_PROFILE)?,
            photos_bucket: string(PHOTOS_BUCKET)?,
            default_aws_region: string(DEFAULT_AWS_REGION)?,
            show_warnings: flag(SHOW_WARNINGS)?,
            show_admin_tools: flag(SHOW_ADMIN_TOOLS)?,
            table_name: string(TABLE_NAME)?,
        })
    }

    pub fn warnings_enabled(&self) -> bool {
        self.show_warnings != 0
    }

    pub fn admin_tools_enabled(&self) -> bool {
        self.show_admin_tools != 0
    }

    pub fn is_production(&self) -> bool {
        self.node_env.as_deref() == Some("production")
    }
}
