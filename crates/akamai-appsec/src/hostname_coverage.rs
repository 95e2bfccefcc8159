//! Hostname coverage: which hostnames are protected, by which configuration
//! and match target, and where configurations overlap.

use crate::client::{required_id, AppsecClient, Endpoint};
use crate::Result;
use akamai_core::query::QueryParams;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Lists every hostname visible to the account and its coverage status.
///
/// Takes no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetApiHostnameCoverageRequest;

impl Validate for GetApiHostnameCoverageRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Response of [`AppsecClient::get_api_hostname_coverage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetApiHostnameCoverageResponse {
    /// One entry per hostname
    #[serde(default)]
    pub hostname_coverage: Vec<HostnameCoverage>,
}

/// Coverage of a single hostname.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnameCoverage {
    /// Configuration covering the hostname, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<CoveringConfiguration>,
    /// `covered` or `not_covered`
    #[serde(default)]
    pub status: String,
    /// Whether a match target references the hostname
    #[serde(default)]
    pub has_match_target: bool,
    /// Hostname
    #[serde(default)]
    pub hostname: String,
    /// Security policies applied to the hostname
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy_names: Vec<String>,
}

/// Configuration reference inside a [`HostnameCoverage`] entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveringConfiguration {
    /// Configuration id
    #[serde(default)]
    pub id: i64,
    /// Configuration name
    #[serde(default)]
    pub name: String,
    /// Production version
    #[serde(default)]
    pub version: i64,
}

/// Match targets of one configuration version that cover a hostname.
///
/// `hostname` is always sent, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetApiHostnameCoverageMatchTargetsRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Hostname to look up
    pub hostname: String,
}

/// Same lookup as [`GetApiHostnameCoverageMatchTargetsRequest`], decoded into
/// the earlier response layout that carries target ids and per-target
/// security controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetApiHostnameCoverageMatchTargetsLegacyRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Hostname to look up
    pub hostname: String,
}

/// Security control flags. Flags the server omits decode as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools, missing_docs)]
pub struct SecurityControls {
    pub apply_api_constraints: bool,
    pub apply_application_layer_controls: bool,
    pub apply_botman_controls: bool,
    pub apply_network_layer_controls: bool,
    pub apply_page_integrity_controls: bool,
    pub apply_rate_controls: bool,
    pub apply_reputation_controls: bool,
    pub apply_slow_post_controls: bool,
}

/// Network list whose clients bypass a match target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BypassNetworkList {
    /// Network list id
    #[serde(default)]
    pub id: String,
    /// Network list name
    #[serde(default)]
    pub name: String,
}

/// Security policy applied by a match target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallPolicy {
    /// Whether the policy runs in evaluation mode
    #[serde(default)]
    pub evaluated: bool,
    /// Security policy id
    #[serde(default)]
    pub policy_id: String,
    /// Security policy name
    #[serde(default)]
    pub policy_name: String,
    /// Protections enabled on the policy
    #[serde(default)]
    pub policy_security_controls: SecurityControls,
}

/// Website match target, current layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteTarget {
    /// Target kind (`website`)
    #[serde(rename = "type", default)]
    pub target_type: String,
    /// Network lists that bypass the target
    #[serde(default)]
    pub bypass_network_lists: Vec<BypassNetworkList>,
    /// Configuration id
    #[serde(default)]
    pub config_id: i64,
    /// Configuration version
    #[serde(default)]
    pub config_version: i64,
    /// How the site root is matched (`NO_MATCH`, `BASE_MATCH`, ...)
    #[serde(default)]
    pub default_file: String,
    /// Matched paths
    #[serde(default)]
    pub file_paths: Vec<String>,
    /// Matched file extensions
    #[serde(default)]
    pub file_extensions: Vec<String>,
    /// Policy applied to matching requests
    #[serde(default)]
    pub firewall_policy: FirewallPolicy,
    /// Matched hostnames
    #[serde(default)]
    pub hostnames: Vec<String>,
    /// Match target id
    #[serde(default)]
    pub id: i64,
    /// Match everything except the listed extensions
    #[serde(default)]
    pub is_negative_file_extension_match: bool,
    /// Match everything except the listed paths
    #[serde(default)]
    pub is_negative_path_match: bool,
    /// Evaluation order within the configuration
    #[serde(default)]
    pub sequence: i64,
}

/// Match targets grouped by kind, current layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTargets {
    /// API match targets, kept as sent by the server
    #[serde(default)]
    pub api_targets: Vec<serde_json::Value>,
    /// Website match targets
    #[serde(default)]
    pub website_targets: Vec<WebsiteTarget>,
}

/// Response of [`AppsecClient::get_api_hostname_coverage_match_targets`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetApiHostnameCoverageMatchTargetsResponse {
    /// Match targets
    #[serde(default)]
    pub match_targets: MatchTargets,
}

/// Per-target controls of a legacy match target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSecurityControls {
    /// Enabled protections
    #[serde(flatten)]
    pub controls: SecurityControls,
    /// Target kind
    #[serde(rename = "type", default)]
    pub target_type: String,
}

/// Website match target, legacy layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyWebsiteTarget {
    /// Network lists that bypass the target
    #[serde(default)]
    pub bypass_network_lists: Vec<BypassNetworkList>,
    /// Configuration id
    #[serde(default)]
    pub config_id: i64,
    /// Configuration version
    #[serde(default)]
    pub config_version: i64,
    /// How the site root is matched
    #[serde(default)]
    pub default_file: String,
    /// Protections actually in force for the target
    #[serde(default)]
    pub effective_security_controls: SecurityControls,
    /// Matched file extensions
    #[serde(default)]
    pub file_extensions: Vec<String>,
    /// Matched paths
    #[serde(default)]
    pub file_paths: Vec<String>,
    /// Policy applied to matching requests
    #[serde(default)]
    pub firewall_policy: FirewallPolicy,
    /// Matched hostnames
    #[serde(default)]
    pub hostnames: Vec<String>,
    /// Match everything except the listed extensions
    #[serde(default)]
    pub is_negative_file_extension_match: bool,
    /// Match everything except the listed paths
    #[serde(default)]
    pub is_negative_path_match: bool,
    /// Whether `target_security_controls` may be changed
    #[serde(default)]
    pub is_target_security_controls_editable: bool,
    /// Id shared by all versions of the target
    #[serde(default)]
    pub logical_id: i64,
    /// Evaluation order within the configuration
    #[serde(default)]
    pub sequence: i64,
    /// Version-specific target id
    #[serde(default)]
    pub target_id: i64,
    /// Protections configured on the target
    #[serde(default)]
    pub target_security_controls: TargetSecurityControls,
}

/// Match targets grouped by kind, legacy layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMatchTargets {
    /// API match targets, kept as sent by the server
    #[serde(default)]
    pub api_targets: Vec<serde_json::Value>,
    /// Website match targets
    #[serde(default)]
    pub website_targets: Vec<LegacyWebsiteTarget>,
}

/// Response of [`AppsecClient::get_api_hostname_coverage_match_targets_legacy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetApiHostnameCoverageMatchTargetsLegacyResponse {
    /// Match targets
    #[serde(default)]
    pub match_targets: LegacyMatchTargets,
}

/// Other configurations that also cover a hostname.
///
/// `hostname` is always sent, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetApiHostnameCoverageOverlappingRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Hostname to look up
    pub hostname: String,
}

/// A configuration overlapping the requested one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlappingConfiguration {
    /// Configuration id
    #[serde(default)]
    pub config_id: i64,
    /// Configuration name
    #[serde(default)]
    pub config_name: String,
    /// Configuration version
    #[serde(default)]
    pub config_version: i64,
    /// Contract id
    #[serde(default)]
    pub contract_id: String,
    /// Contract name
    #[serde(default)]
    pub contract_name: String,
    /// Activation state of the version (`PRODUCTION`, `STAGING`, ...)
    #[serde(default)]
    pub version_tags: Vec<String>,
}

/// Response of [`AppsecClient::get_api_hostname_coverage_overlapping`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetApiHostnameCoverageOverlappingResponse {
    /// Overlapping configurations
    #[serde(rename = "overLappingList", default)]
    pub overlapping_list: Vec<OverlappingConfiguration>,
}

fn hostname_coverage_path(config_id: i64, version: i64, sub: &str) -> String {
    format!("/appsec/v1/configs/{config_id}/versions/{version}/hostname-coverage/{sub}")
}

impl Endpoint for GetApiHostnameCoverageRequest {
    type Response = GetApiHostnameCoverageResponse;
    const OPERATION: &'static str = "GetApiHostnameCoverage";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/appsec/v1/hostname-coverage".to_string()
    }
}

impl Endpoint for GetApiHostnameCoverageMatchTargetsRequest {
    type Response = GetApiHostnameCoverageMatchTargetsResponse;
    const OPERATION: &'static str = "GetApiHostnameCoverageMatchTargets";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        hostname_coverage_path(self.config_id, self.version, "match-targets")
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with("hostname", &self.hostname)
    }
}

impl Endpoint for GetApiHostnameCoverageMatchTargetsLegacyRequest {
    type Response = GetApiHostnameCoverageMatchTargetsLegacyResponse;
    const OPERATION: &'static str = "GetApiHostnameCoverageMatchTargets";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        hostname_coverage_path(self.config_id, self.version, "match-targets")
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with("hostname", &self.hostname)
    }
}

impl Endpoint for GetApiHostnameCoverageOverlappingRequest {
    type Response = GetApiHostnameCoverageOverlappingResponse;
    const OPERATION: &'static str = "GetApiHostnameCoverageOverlapping";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        hostname_coverage_path(self.config_id, self.version, "overlapping")
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with("hostname", &self.hostname)
    }
}

impl AppsecClient {
    /// List hostnames and their coverage status.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_api_hostname_coverage(
        &self,
        params: &GetApiHostnameCoverageRequest,
    ) -> Result<GetApiHostnameCoverageResponse> {
        self.execute(params).await
    }

    /// List the match targets of a configuration version covering a hostname.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_api_hostname_coverage_match_targets(
        &self,
        params: &GetApiHostnameCoverageMatchTargetsRequest,
    ) -> Result<GetApiHostnameCoverageMatchTargetsResponse> {
        self.execute(params).await
    }

    /// Same as [`AppsecClient::get_api_hostname_coverage_match_targets`],
    /// decoded into the legacy layout.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_api_hostname_coverage_match_targets_legacy(
        &self,
        params: &GetApiHostnameCoverageMatchTargetsLegacyRequest,
    ) -> Result<GetApiHostnameCoverageMatchTargetsLegacyResponse> {
        self.execute(params).await
    }

    /// List configurations that overlap with a configuration version on a hostname.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_api_hostname_coverage_overlapping(
        &self,
        params: &GetApiHostnameCoverageOverlappingRequest,
    ) -> Result<GetApiHostnameCoverageOverlappingResponse> {
        self.execute(params).await
    }
}
