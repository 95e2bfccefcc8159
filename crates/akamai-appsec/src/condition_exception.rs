//! Condition and exception blocks attached to rules and eval rules.
//!
//! A rule fires only when its conditions match, and never for requests
//! covered by its exception.

use crate::filter::Identified;
use serde::{Deserialize, Serialize};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Serialize)]
struct RemoveBody<'a> {
    empty: &'a str,
}

/// Body that clears the condition exception of a rule: `{"empty":""}`.
pub(crate) fn remove_body() -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&RemoveBody { empty: "" })
}

/// Conditions and exceptions configured on a rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConditionException {
    /// Conditions under which the rule applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<RuleCondition>>,

    /// Request parts excluded from inspection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<RuleException>,

    /// Advanced exceptions, kept as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_exceptions: Option<serde_json::Value>,
}

impl RuleConditionException {
    /// Returns true if no condition, exception or advanced exception is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.conditions.as_ref().is_some_and(|conditions| !conditions.is_empty())
            && !self.exception.as_ref().is_some_and(|exception| !exception.is_empty())
            && self.advanced_exceptions.is_none()
    }
}

/// One element of a rule list: the rule id, its action, and its condition
/// exception when the list was requested with condition exceptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEntry {
    /// Rule id
    #[serde(default)]
    pub id: i64,

    /// Action taken when the rule triggers (`alert`, `deny`, `none`, ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,

    /// Conditions and exceptions, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_exception: Option<RuleConditionException>,
}

impl Identified for RuleEntry {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A single match condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    /// Condition kind, e.g. `extensionMatch` or `ipMatch`
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub condition_type: String,
    /// File extensions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    /// File names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filenames: Vec<String>,
    /// Host names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,
    /// IP addresses or CIDR blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ips: Vec<String>,
    /// HTTP methods
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    /// URL paths
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
    /// Header name for `requestHeaderMatch`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub header: String,
    /// Case-sensitive header match
    #[serde(default, skip_serializing_if = "is_false")]
    pub case_sensitive: bool,
    /// Parameter or cookie name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Case-sensitive name match
    #[serde(default, skip_serializing_if = "is_false")]
    pub name_case: bool,
    /// Whether the condition matches (true) or must not match (false)
    #[serde(default)]
    pub positive_match: bool,
    /// Value to match
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Allow wildcards in the name
    #[serde(default, skip_serializing_if = "is_false")]
    pub wildcard: bool,
    /// Case-sensitive value match
    #[serde(default, skip_serializing_if = "is_false")]
    pub value_case: bool,
    /// Allow wildcards in the value
    #[serde(default, skip_serializing_if = "is_false")]
    pub value_wildcard: bool,
    /// Match on forwarded client IP headers as well
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_headers: bool,
    /// Client list ids for `clientListMatch`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub client_lists: Vec<String>,
}

/// Request parts a rule must not inspect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleException {
    /// Selectors excluded regardless of name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_header_cookie_or_param: Vec<String>,

    /// Values excluded wherever they appear
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header_cookie_or_param_values: Vec<String>,

    /// A single name/value pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_header_cookie_or_param_name_value: Option<HeaderCookieOrParamNameValue>,

    /// Named headers, cookies or parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_header_cookie_or_param_names: Vec<HeaderCookieOrParamNames>,

    /// Names sharing a prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_header_cookie_or_param_prefix: Option<HeaderCookieOrParamPrefix>,
}

impl RuleException {
    /// Returns true if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.any_header_cookie_or_param.is_empty()
            && self.header_cookie_or_param_values.is_empty()
            && self.specific_header_cookie_or_param_name_value.is_none()
            && self.specific_header_cookie_or_param_names.is_empty()
            && self.specific_header_cookie_or_param_prefix.is_none()
    }
}

/// Names excluded under one selector (`REQUEST_HEADERS`, `REQUEST_COOKIES`, `ARGS`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCookieOrParamNames {
    /// Excluded names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    /// Part of the request the names apply to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub selector: String,
}

/// Names excluded by prefix under one selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCookieOrParamPrefix {
    /// Name prefix
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    /// Part of the request the names apply to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub selector: String,
}

/// A single excluded name/value pair under one selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCookieOrParamNameValue {
    /// Parameter or cookie name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Part of the request the names apply to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub selector: String,
    /// Value to match
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_conditions_and_exception() {
        let value = json!({
            "conditions": [
                {"type": "extensionMatch", "extensions": ["test"], "positiveMatch": true},
                {"type": "requestHeaderMatch", "header": "X-Test", "value": "abc", "valueCase": true, "positiveMatch": false}
            ],
            "exception": {
                "headerCookieOrParamValues": ["attack"],
                "specificHeaderCookieOrParamNames": [
                    {"names": ["ABC"], "selector": "REQUEST_HEADERS"}
                ],
                "specificHeaderCookieOrParamPrefix": {"prefix": "a*", "selector": "REQUEST_COOKIES"}
            }
        });

        let decoded: RuleConditionException = serde_json::from_value(value).unwrap();
        let conditions = decoded.conditions.as_ref().unwrap();
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].condition_type, "extensionMatch");
        assert_eq!(conditions[0].extensions, vec!["test"]);
        assert!(conditions[0].positive_match);
        assert_eq!(conditions[1].header, "X-Test");
        assert!(conditions[1].value_case);

        let exception = decoded.exception.as_ref().unwrap();
        assert_eq!(exception.header_cookie_or_param_values, vec!["attack"]);
        assert_eq!(
            exception.specific_header_cookie_or_param_names,
            vec![HeaderCookieOrParamNames {
                names: vec!["ABC".to_string()],
                selector: "REQUEST_HEADERS".to_string(),
            }]
        );
        assert_eq!(
            exception
                .specific_header_cookie_or_param_prefix
                .as_ref()
                .map(|prefix| prefix.prefix.as_str()),
            Some("a*")
        );
        assert!(!decoded.is_empty());
    }

    #[test]
    fn empty_blocks_are_empty() {
        let decoded: RuleConditionException = serde_json::from_value(json!({})).unwrap();
        assert!(decoded.is_empty());

        let decoded: RuleConditionException =
            serde_json::from_value(json!({"conditions": [], "exception": {}})).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn remove_body_carries_empty_marker() {
        assert_eq!(remove_body().unwrap(), br#"{"empty":""}"#.to_vec());
    }

    #[test]
    fn serializes_only_set_fields() {
        let block = RuleConditionException {
            conditions: Some(vec![RuleCondition {
                condition_type: "ipMatch".to_string(),
                ips: vec!["1.2.3.4/32".to_string()],
                use_headers: true,
                positive_match: true,
                ..RuleCondition::default()
            }]),
            ..RuleConditionException::default()
        };

        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "conditions": [
                    {"type": "ipMatch", "ips": ["1.2.3.4/32"], "useHeaders": true, "positiveMatch": true}
                ]
            })
        );
    }
}
