//! Condition exceptions of evaluation rules.

use crate::client::{required_id, AppsecClient, Endpoint};
use crate::condition_exception::{remove_body, RuleConditionException, RuleEntry};
use crate::eval_rule::{eval_rule_path, eval_rules_path, INCLUDE_CONDITION_EXCEPTION};
use crate::filter::filter_by_id;
use crate::payload::RawPayload;
use crate::Result;
use akamai_core::query::QueryParams;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lists eval rules with their condition exceptions, optionally narrowed to one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetEvalRuleConditionExceptionsRequest {
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

/// Response of [`AppsecClient::get_eval_rule_condition_exceptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetEvalRuleConditionExceptionsResponse {
    /// Eval rules with their condition exceptions
    #[serde(rename = "evalRuleActions", default)]
    pub rules: Vec<RuleEntry>,
}

/// Reads the condition exception of one eval rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct GetEvalRuleConditionExceptionRequest {
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

/// Response of [`AppsecClient::get_eval_rule_condition_exception`].
pub type GetEvalRuleConditionExceptionResponse = RuleConditionException;

/// Replaces the condition exception of one eval rule.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UpdateEvalRuleConditionExceptionRequest {
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

/// Response of [`AppsecClient::update_eval_rule_condition_exception`].
pub type UpdateEvalRuleConditionExceptionResponse = RuleConditionException;

/// Clears the condition exception of one eval rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RemoveEvalRuleConditionExceptionRequest {
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

/// Response of [`AppsecClient::remove_eval_rule_condition_exception`].
pub type RemoveEvalRuleConditionExceptionResponse = RuleConditionException;

fn condition_exception_path(config_id: i64, version: i64, policy_id: &str, rule_id: i64) -> String {
    format!(
        "{}/condition-exception",
        eval_rule_path(config_id, version, policy_id, rule_id)
    )
}

impl Endpoint for GetEvalRuleConditionExceptionsRequest {
    type Response = GetEvalRuleConditionExceptionsResponse;
    const OPERATION: &'static str = "GetEvalRuleConditionExceptions";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        eval_rules_path(self.config_id, self.version, &self.policy_id)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with(INCLUDE_CONDITION_EXCEPTION, true)
    }

    fn post_process(&self, response: Self::Response) -> Self::Response {
        GetEvalRuleConditionExceptionsResponse {
            rules: filter_by_id(response.rules, self.rule_id),
        }
    }
}

impl Endpoint for GetEvalRuleConditionExceptionRequest {
    type Response = GetEvalRuleConditionExceptionResponse;
    const OPERATION: &'static str = "GetEvalRuleConditionException";
    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        condition_exception_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }
}

impl Endpoint for UpdateEvalRuleConditionExceptionRequest {
    type Response = UpdateEvalRuleConditionExceptionResponse;
    const OPERATION: &'static str = "UpdateEvalRuleConditionException";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        condition_exception_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        Ok(Some(self.condition_exception.to_bytes()))
    }
}

impl Endpoint for RemoveEvalRuleConditionExceptionRequest {
    type Response = RemoveEvalRuleConditionExceptionResponse;
    const OPERATION: &'static str = "RemoveEvalRuleConditionException";
    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        condition_exception_path(self.config_id, self.version, &self.policy_id, self.rule_id)
    }

    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        remove_body().map(Some)
    }
}

impl AppsecClient {
    /// List eval rules of a security policy with their condition exceptions.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_eval_rule_condition_exceptions(
        &self,
        params: &GetEvalRuleConditionExceptionsRequest,
    ) -> Result<GetEvalRuleConditionExceptionsResponse> {
        self.execute(params).await
    }

    /// Read the condition exception of one eval rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn get_eval_rule_condition_exception(
        &self,
        params: &GetEvalRuleConditionExceptionRequest,
    ) -> Result<GetEvalRuleConditionExceptionResponse> {
        self.execute(params).await
    }

    /// Replace the condition exception of one eval rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn update_eval_rule_condition_exception(
        &self,
        params: &UpdateEvalRuleConditionExceptionRequest,
    ) -> Result<UpdateEvalRuleConditionExceptionResponse> {
        self.execute(params).await
    }

    /// Clear the condition exception of one eval rule.
    ///
    /// # Errors
    ///
    /// See [`AppsecClient::execute`].
    pub async fn remove_eval_rule_condition_exception(
        &self,
        params: &RemoveEvalRuleConditionExceptionRequest,
    ) -> Result<RemoveEvalRuleConditionExceptionResponse> {
        self.execute(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use akamai_core::Error;
    use serde_json::json;
    use wiremock::matchers::{body_string, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EVAL_RULES_PATH: &str =
        "/appsec/v1/configs/43253/versions/15/security-policies/AAAA_81230/eval-rules";
    const CONDITION_EXCEPTION_PATH: &str = "/appsec/v1/configs/43253/versions/15/security-policies/AAAA_81230/eval-rules/699989/condition-exception";

    fn test_client(server: &MockServer) -> AppsecClient {
        AppsecClient::new(server.uri()).unwrap()
    }

    fn condition_exception_json() -> serde_json::Value {
        json!({
            "conditions": [
                {"type": "requestMethodMatch", "methods": ["POST"], "positiveMatch": true}
            ],
            "exception": {
                "specificHeaderCookieOrParamNames": [
                    {"names": ["session"], "selector": "REQUEST_COOKIES"}
                ]
            }
        })
    }

    #[tokio::test]
    async fn list_filters_by_rule() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVAL_RULES_PATH))
            .and(query_param("includeConditionException", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "evalRuleActions": [
                    {"id": 699_989, "action": "alert", "conditionException": condition_exception_json()},
                    {"id": 699_990, "action": "alert"}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client
            .get_eval_rule_condition_exceptions(&GetEvalRuleConditionExceptionsRequest {
                config_id: 43253,
                version: 15,
                policy_id: "AAAA_81230".to_string(),
                rule_id: 699_989,
            })
            .await
            .unwrap();
        assert_eq!(response.rules.len(), 1);
        let block = response.rules[0].condition_exception.as_ref().unwrap();
        assert_eq!(block.conditions.as_ref().unwrap()[0].methods, vec!["POST"]);
    }

    #[tokio::test]
    async fn get_decodes_condition_exception() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CONDITION_EXCEPTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(condition_exception_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let block = client
            .get_eval_rule_condition_exception(&GetEvalRuleConditionExceptionRequest {
                config_id: 43253,
                version: 15,
                policy_id: "AAAA_81230".to_string(),
                rule_id: 699_989,
            })
            .await
            .unwrap();
        assert_eq!(
            block
                .exception
                .as_ref()
                .map(|exception| exception.specific_header_cookie_or_param_names[0].selector.as_str()),
            Some("REQUEST_COOKIES")
        );
    }

    #[tokio::test]
    async fn update_sends_payload_verbatim() {
        let raw = r#"{"conditions": [{"type": "requestMethodMatch", "methods": ["POST"], "positiveMatch": true}]}"#;
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(CONDITION_EXCEPTION_PATH))
            .and(body_string(raw))
            .respond_with(ResponseTemplate::new(200).set_body_json(condition_exception_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let block = client
            .update_eval_rule_condition_exception(&UpdateEvalRuleConditionExceptionRequest {
                config_id: 43253,
                version: 15,
                policy_id: "AAAA_81230".to_string(),
                rule_id: 699_989,
                condition_exception: RawPayload::from_json(raw).unwrap(),
            })
            .await
            .unwrap();
        assert!(!block.is_empty());
    }

    #[tokio::test]
    async fn update_requires_rule_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .update_eval_rule_condition_exception(&UpdateEvalRuleConditionExceptionRequest {
                config_id: 43253,
                version: 15,
                policy_id: "AAAA_81230".to_string(),
                rule_id: 0,
                condition_exception: RawPayload::from_json("{}").unwrap(),
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn remove_sends_empty_marker() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(CONDITION_EXCEPTION_PATH))
            .and(body_string(r#"{"empty":""}"#))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let block = client
            .remove_eval_rule_condition_exception(&RemoveEvalRuleConditionExceptionRequest {
                config_id: 43253,
                version: 15,
                policy_id: "AAAA_81230".to_string(),
                rule_id: 699_989,
            })
            .await
            .unwrap();
        assert!(block.is_empty());
    }

    #[tokio::test]
    async fn remove_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such rule"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .remove_eval_rule_condition_exception(&RemoveEvalRuleConditionExceptionRequest {
                config_id: 43253,
                version: 15,
                policy_id: "AAAA_81230".to_string(),
                rule_id: 699_989,
            })
            .await
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status_code, 404);
                assert_eq!(api.detail, "no such rule");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
