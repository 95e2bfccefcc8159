//! Condition exceptions of enforced (non-evaluation) rules.

use crate::client::{required_id, security_policy_path, AppsecClient, Endpoint};
use crate::condition_exception::{remove_body, RuleConditionException, RuleEntry};
use crate::eval_rule::INCLUDE_CONDITION_EXCEPTION;
use crate::filter::filter_by_id;
use crate::payload::RawPayload;
use crate::Result;
use akamai_core::query::QueryParams;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn rules_path(config_id: i64, version: i64, policy_id: &str) -> String {
    format!("{}/rules", security_policy_path(config_id, version, policy_id))
}

fn condition_exception_path(config_id: i64, version: i64, policy_id: &str, rule_id: i64) -> String {
    format!(
        "{}/{rule_id}/condition-exception",
        rules_path(config_id, version, policy_id)
    )
}

/// Lists rules with their condition exceptions, optionally narrowed to one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetRuleConditionExceptionsRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Security policy id
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub policy_id: String,
    /// Keep only this rule; `0` returns every rule
    pub rule_id: i64,
}

/// Response of [`AppsecClient::get_rule_condition_exceptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetRuleConditionExceptionsResponse {
    /// Rules with their actions and condition exceptions
    #[serde(rename = "ruleActions", default)]
    pub rules: Vec<RuleEntry>,
}

/// Reads the condition exception of one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetRuleConditionExceptionRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Security policy id
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub policy_id: String,
    /// Rule id
    #[validate(custom(function = "required_id"))]
    pub rule_id: i64,
}

/// Response of [`AppsecClient::get_rule_condition_exception`].
pub type GetRuleConditionExceptionResponse = RuleConditionException;

/// Replaces the condition exception of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UpdateRuleConditionExceptionRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Security policy id
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub policy_id: String,
    /// Rule id
    #[validate(custom(function = "required_id"))]
    pub rule_id: i64,
    /// New condition exception, sent verbatim as the body
    pub condition_exception: RawPayload,
}

/// Response of [`AppsecClient::update_rule_condition_exception`].
pub type UpdateRuleConditionExceptionResponse = RuleConditionException;

/// Clears the condition exception of one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RemoveRuleConditionExceptionRequest {
    /// Configuration id
    #[validate(custom(function = "required_id"))]
    pub config_id: i64,
    /// Configuration version
    #[validate(custom(function = "required_id"))]
    pub version: i64,
    /// Security policy id
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub policy_id: String,
    /// Rule id
    #[validate(custom(function = "required_id"))]
    pub rule_id: i64,
}

/// Response of [`AppsecClient::remove_rule_condition_exception`].
pub type RemoveRuleConditionExceptionResponse = RuleConditionException;

impl Endpoint for GetRuleConditionExceptionsRequest {
    type Response = GetRuleConditionExceptionsResponse;
    const OPERATION: &'static str = "GetRuleConditionExceptions";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        rules_path(self.config_id, self.version, &self.policy_id)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with(INCLUDE_CONDITION_EXCEPTION, true)
    }

    fn post_process(&self, response: Self::Response) -> Self::Response {
        GetRuleConditionExceptionsResponse {
            rules: filter_by_id(response.rules, self.rule_id),
        }
    }
}

impl Endpoint for GetRuleConditionExceptionRequest {
    type Response = GetRuleConditionExceptionResponse;
    const OPERATION: &'static str = "GetRuleConditionException";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        condition_exception_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }
}

impl Endpoint for UpdateRuleConditionExceptionRequest {
    type Response = UpdateRuleConditionExceptionResponse;
    const OPERATION: &'static str = "UpdateRuleConditionException";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        condition_exception_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        Ok(Some(self.condition_exception.to_bytes()))
    }
}

impl Endpoint for RemoveRuleConditionExceptionRequest {
    type Response = RemoveRuleConditionExceptionResponse;
    const OPERATION: &'static str = "RemoveRuleConditionException";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        condition_exception_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        remove_body().map(Some)
    }
}

impl AppsecClient {
    /// List rules of a security policy with their condition exceptions.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_rule_condition_exceptions(
        &self,
        params: &GetRuleConditionExceptionsRequest,
    ) -> Result<GetRuleConditionExceptionsResponse> {
        self.execute(params).await
    }

    /// Read the condition exception of one rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_rule_condition_exception(
        &self,
        params: &GetRuleConditionExceptionRequest,
    ) -> Result<GetRuleConditionExceptionResponse> {
        self.execute(params).await
    }

    /// Replace the condition exception of one rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn update_rule_condition_exception(
        &self,
        params: &UpdateRuleConditionExceptionRequest,
    ) -> Result<UpdateRuleConditionExceptionResponse> {
        self.execute(params).await
    }

    /// Clear the condition exception of one rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn remove_rule_condition_exception(
        &self,
        params: &RemoveRuleConditionExceptionRequest,
    ) -> Result<RemoveRuleConditionExceptionResponse> {
        self.execute(params).await
    }
}
