//! IP/Geo firewall settings of a security policy.
//!
//! The firewall either blocks the listed IPs, geographies and ASNs
//! (`blockSpecificIPGeo`) or blocks everything except the allowed IP lists
//! (`blockAllTrafficExceptAllowedIPs`).

use crate::client::{required_id, security_policy_path, AppsecClient, Endpoint};
use crate::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Network lists referenced by a firewall control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpGeoNetworkLists {
    /// Network list ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_list: Vec<String>,
}

/// Geography network lists to block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpGeoGeoControls {
    /// Blocked lists
    #[serde(
        rename = "blockedIPNetworkLists",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub blocked_ip_network_lists: Option<IpGeoNetworkLists>,
}

/// ASN network lists to block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpGeoAsnControls {
    /// Blocked lists
    #[serde(
        rename = "blockedIPNetworkLists",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub blocked_ip_network_lists: Option<IpGeoNetworkLists>,
}

/// IP network lists to allow or block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpGeoIpControls {
    /// Allowed lists
    #[serde(
        rename = "allowedIPNetworkLists",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_ip_network_lists: Option<IpGeoNetworkLists>,

    /// Blocked lists
    #[serde(
        rename = "blockedIPNetworkLists",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub blocked_ip_network_lists: Option<IpGeoNetworkLists>,
}

/// Action applied to traffic from Ukraine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkraineGeoControl {
    /// Action name (`alert`, `deny`, ...)
    pub action: String,
}

/// IP/Geo firewall of a security policy.
///
/// Used both as the update body and as the decoded response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpGeoFirewall {
    /// Blocking mode
    pub block: String,

    /// Geography controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_controls: Option<IpGeoGeoControls>,

    /// IP controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_controls: Option<IpGeoIpControls>,

    /// ASN controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn_controls: Option<IpGeoAsnControls>,

    /// Ukraine-specific action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ukraine_geo_control: Option<UkraineGeoControl>,
}

/// Response of [`AppsecClient::get_ip_geo`].
pub type GetIpGeoResponse = IpGeoFirewall;

/// Response of [`AppsecClient::update_ip_geo`].
pub type UpdateIpGeoResponse = IpGeoFirewall;

/// Identifies the policy whose firewall to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetIpGeoRequest {
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

/// Replaces the firewall settings of a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UpdateIpGeoRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Security policy id
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub policy_id: String,
    /// New firewall settings, sent as the body
    pub firewall: IpGeoFirewall,
}

fn ip_geo_path(config_id: i64, version: i64, policy_id: &str) -> String {
    format!(
        "{}/ip-geo-firewall",
        security_policy_path(config_id, version, policy_id)
    )
}

impl Endpoint for GetIpGeoRequest {
    type Response = GetIpGeoResponse;
    const OPERATION: &'static str = "GetIPGeo";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        ip_geo_path(self.config_id, self.version, &self.policy_id)
    }
}

impl Endpoint for UpdateIpGeoRequest {
    type Response = UpdateIpGeoResponse;
    const OPERATION: &'static str = "UpdateIPGeo";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        ip_geo_path(self.config_id, self.version, &self.policy_id)
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        serde_json::to_vec(&self.firewall).map(Some)
    }
}

impl AppsecClient {
    /// Read the IP/Geo firewall settings of a security policy.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_ip_geo(&self, params: &GetIpGeoRequest) -> Result<GetIpGeoResponse> {
        self.execute(params).await
    }

    /// Replace the IP/Geo firewall settings of a security policy.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn update_ip_geo(&self, params: &UpdateIpGeoRequest) -> Result<UpdateIpGeoResponse> {
        self.execute(params).await
    }
}
