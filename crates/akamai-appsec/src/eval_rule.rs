//! Evaluation rules: the rules of a policy running in evaluation mode, with
//! their actions and condition exceptions.

use crate::client::{required_id, security_policy_path, AppsecClient, Endpoint};
use crate::condition_exception::{RuleConditionException, RuleEntry};
use crate::filter::filter_by_id;
use crate::payload::RawPayload;
use crate::Result;
use akamai_core::query::QueryParams;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub(crate) const INCLUDE_CONDITION_EXCEPTION: &str = "includeConditionException";

pub(crate) fn eval_rules_path(config_id: i64, version: i64, policy_id: &str) -> String {
    format!(
        "{}/eval-rules",
        security_policy_path(config_id, version, policy_id)
    )
}

pub(crate) fn eval_rule_path(config_id: i64, version: i64, policy_id: &str, rule_id: i64) -> String {
    format!("{}/{rule_id}", eval_rules_path(config_id, version, policy_id))
}

/// Lists the eval rules of a policy, optionally narrowed to one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetEvalRulesRequest {
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

/// Response of [`AppsecClient::get_eval_rules`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetEvalRulesResponse {
    /// Eval rules with their actions and condition exceptions
    #[serde(rename = "evalRuleActions", default)]
    pub rules: Vec<RuleEntry>,
}

/// Reads one eval rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetEvalRuleRequest {
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

/// Action and condition exception of an eval rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalRuleActionConditionException {
    /// Action taken when the rule triggers
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,

    /// Conditions and exceptions, absent when none are configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_exception: Option<RuleConditionException>,
}

impl EvalRuleActionConditionException {
    /// Returns true if the rule has no condition exception block.
    #[must_use]
    pub fn is_empty_condition_exception(&self) -> bool {
        self.condition_exception.is_none()
    }
}

/// Response of [`AppsecClient::get_eval_rule`].
pub type GetEvalRuleResponse = EvalRuleActionConditionException;

/// Response of [`AppsecClient::update_eval_rule`].
pub type UpdateEvalRuleResponse = EvalRuleActionConditionException;

/// Sets the action and condition exception of an eval rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UpdateEvalRuleRequest {
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
    /// New action
    pub action: String,
    /// New condition exception, sent verbatim; omitted when `None`
    pub condition_exception: Option<RawPayload>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionConditionExceptionBody<'a> {
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition_exception: Option<&'a RawPayload>,
}

impl Endpoint for GetEvalRulesRequest {
    type Response = GetEvalRulesResponse;
    const OPERATION: &'static str = "GetEvalRules";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        eval_rules_path(self.config_id, self.version, &self.policy_id)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with(INCLUDE_CONDITION_EXCEPTION, true)
    }

    fn post_process(&self, response: Self::Response) -> Self::Response {
        GetEvalRulesResponse {
            rules: filter_by_id(response.rules, self.rule_id),
        }
    }
}

impl Endpoint for GetEvalRuleRequest {
    type Response = GetEvalRuleResponse;
    const OPERATION: &'static str = "GetEvalRule";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        eval_rule_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with(INCLUDE_CONDITION_EXCEPTION, true)
    }
}

impl Endpoint for UpdateEvalRuleRequest {
    type Response = UpdateEvalRuleResponse;
    const OPERATION: &'static str = "UpdateEvalRule";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!(
            "{}/action-condition-exception",
            eval_rule_path(self.config_id, self.version, &self.policy_id, self.rule_id)
        )
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        serde_json::to_vec(&ActionConditionExceptionBody {
            action: &self.action,
            condition_exception: self.condition_exception.as_ref(),
        })
        .map(Some)
    }
}

impl AppsecClient {
    /// List the eval rules of a security policy with their condition exceptions.
    ///
    /// When `rule_id` is set only that rule is returned (or none, if the policy
    /// has no such rule).
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_eval_rules(&self, params: &GetEvalRulesRequest) -> Result<GetEvalRulesResponse> {
        self.execute(params).await
    }

    /// Read the action and condition exception of one eval rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_eval_rule(&self, params: &GetEvalRuleRequest) -> Result<GetEvalRuleResponse> {
        self.execute(params).await
    }

    /// Replace the action and condition exception of one eval rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn update_eval_rule(
        &self,
        params: &UpdateEvalRuleRequest,
    ) -> Result<UpdateEvalRuleResponse> {
        self.execute(params).await
    }
}
