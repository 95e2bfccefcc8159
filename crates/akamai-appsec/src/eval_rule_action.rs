//! Actions of evaluation rules.

use crate::client::{required_id, AppsecClient, Endpoint};
use crate::eval_rule::{eval_rule_path, eval_rules_path};
use crate::filter::{filter_by_id, Identified};
use crate::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Action of one eval rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalRuleAction {
    /// Action taken when the rule triggers
    #[serde(default)]
    pub action: String,
    /// Rule id
    #[serde(default)]
    pub id: i64,
}

impl Identified for EvalRuleAction {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Lists eval rule actions of a policy, optionally narrowed to one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetEvalRuleActionsRequest {
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

/// Response of [`AppsecClient::get_eval_rule_actions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEvalRuleActionsResponse {
    /// Rule actions
    #[serde(rename = "evalRuleActions", default)]
    pub rule_actions: Vec<EvalRuleAction>,
}

/// Reads the action of one eval rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetEvalRuleActionRequest {
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

/// Response of [`AppsecClient::get_eval_rule_action`].
pub type GetEvalRuleActionResponse = EvalRuleAction;

/// Sets the action of one eval rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UpdateEvalRuleActionRequest {
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
}

/// Response of [`AppsecClient::update_eval_rule_action`].
pub type UpdateEvalRuleActionResponse = EvalRuleAction;

#[derive(Serialize)]
struct ActionBody<'a> {
    action: &'a str,
}

impl Endpoint for GetEvalRuleActionsRequest {
    type Response = GetEvalRuleActionsResponse;
    const OPERATION: &'static str = "GetEvalRuleActions";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        eval_rules_path(self.config_id, self.version, &self.policy_id)
    }

    fn post_process(&self, response: Self::Response) -> Self::Response {
        GetEvalRuleActionsResponse {
            rule_actions: filter_by_id(response.rule_actions, self.rule_id),
        }
    }
}

impl Endpoint for GetEvalRuleActionRequest {
    type Response = GetEvalRuleActionResponse;
    const OPERATION: &'static str = "GetEvalRuleAction";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        eval_rule_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }
}

impl Endpoint for UpdateEvalRuleActionRequest {
    type Response = UpdateEvalRuleActionResponse;
    const OPERATION: &'static str = "UpdateEvalRuleAction";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        eval_rule_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        serde_json::to_vec(&ActionBody {
            action: &self.action,
        })
        .map(Some)
    }
}

impl AppsecClient {
    /// List eval rule actions of a security policy.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_eval_rule_actions(
        &self,
        params: &GetEvalRuleActionsRequest,
    ) -> Result<GetEvalRuleActionsResponse> {
        self.execute(params).await
    }

    /// Read the action of one eval rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_eval_rule_action(
        &self,
        params: &GetEvalRuleActionRequest,
    ) -> Result<GetEvalRuleActionResponse> {
        self.execute(params).await
    }

    /// Change the action of one eval rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn update_eval_rule_action(
        &self,
        params: &UpdateEvalRuleActionRequest,
    ) -> Result<UpdateEvalRuleActionResponse> {
        self.execute(params).await
    }
}
