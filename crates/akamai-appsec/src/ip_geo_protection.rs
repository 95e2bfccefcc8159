//! Enabling or disabling IP/Geo (network layer) protection on a policy.

use crate::client::{required_id, security_policy_path, AppsecClient, Endpoint};
use crate::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Protection flags of a security policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct PolicyProtections {
    /// API request constraints
    #[serde(default)]
    pub apply_api_constraints: bool,
    /// Web application firewall
    #[serde(default)]
    pub apply_application_layer_controls: bool,
    /// Bot manager
    #[serde(default)]
    pub apply_botman_controls: bool,
    /// Malware protection
    #[serde(default)]
    pub apply_malware_controls: bool,
    /// IP/Geo firewall
    #[serde(default)]
    pub apply_network_layer_controls: bool,
    /// Rate controls
    #[serde(default)]
    pub apply_rate_controls: bool,
    /// Client reputation
    #[serde(default)]
    pub apply_reputation_controls: bool,
    /// Slow POST protection
    #[serde(default)]
    pub apply_slow_post_controls: bool,
}

/// Response of [`AppsecClient::get_ip_geo_protection`].
pub type GetIpGeoProtectionResponse = PolicyProtections;

/// Response of [`AppsecClient::update_ip_geo_protection`].
pub type UpdateIpGeoProtectionResponse = PolicyProtections;

/// Identifies the policy whose protections to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetIpGeoProtectionRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Security policy id
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub policy_id: String,
}

/// Turns the IP/Geo firewall of a policy on or off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UpdateIpGeoProtectionRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Security policy id
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub policy_id: String,
    /// New state of the IP/Geo firewall
    pub apply_network_layer_controls: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NetworkLayerToggle {
    apply_network_layer_controls: bool,
}

fn protections_path(config_id: i64, version: i64, policy_id: &str) -> String {
    format!(
        "{}/protections",
        security_policy_path(config_id, version, policy_id)
    )
}

impl Endpoint for GetIpGeoProtectionRequest {
    type Response = GetIpGeoProtectionResponse;
    const OPERATION: &'static str = "GetIPGeoProtection";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        protections_path(self.config_id, self.version, &self.policy_id)
    }
}

impl Endpoint for UpdateIpGeoProtectionRequest {
    type Response = UpdateIpGeoProtectionResponse;
    const OPERATION: &'static str = "UpdateIPGeoProtection";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        protections_path(self.config_id, self.version, &self.policy_id)
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        serde_json::to_vec(&NetworkLayerToggle {
            apply_network_layer_controls: self.apply_network_layer_controls,
        })
        .map(Some)
    }
}

impl AppsecClient {
    /// Read the protection flags of a security policy.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_ip_geo_protection(
        &self,
        params: &GetIpGeoProtectionRequest,
    ) -> Result<GetIpGeoProtectionResponse> {
        self.execute(params).await
    }

    /// Enable or disable the IP/Geo firewall of a security policy.
    ///
    /// Returns the full flag set after the change.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn update_ip_geo_protection(
        &self,
        params: &UpdateIpGeoProtectionRequest,
    ) -> Result<UpdateIpGeoProtectionResponse> {
        self.execute(params).await
    }
}
