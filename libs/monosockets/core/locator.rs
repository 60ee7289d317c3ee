//! Widget locator parsing
//!
//! A widget locator looks like
//! `<scheme>://...?token=<T>&widgetId=<W>&shortName=<S>`. Parsing is
//! all-or-nothing: either every field is present and non-empty, or the
//! caller gets `MalformedLocator` and no identity at all.

use crate::traits::{MonoSocketError, Result};
use url::Url;

/// Identity of one widget channel, extracted once per session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetIdentity {
    pub channel_type: String,
    pub auth_token: String,
    pub widget_id: String,
    pub short_name: String,
}

impl WidgetIdentity {
    /// Parse a locator string
    ///
    /// Repeated query keys resolve to their first occurrence; unknown keys
    /// are ignored.
    pub fn parse(locator: &str) -> Result<Self> {
        let url = Url::parse(locator)
            .map_err(|e| MonoSocketError::MalformedLocator(format!("{}: {}", locator, e)))?;

        let mut token = None;
        let mut widget_id = None;
        let mut short_name = None;

        for (key, value) in url.query_pairs() {
            let slot = match &*key {
                "token" => &mut token,
                "widgetId" => &mut widget_id,
                "shortName" => &mut short_name,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Ok(Self {
            channel_type: url.scheme().to_string(),
            auth_token: required("token", token)?,
            widget_id: required("widgetId", widget_id)?,
            short_name: required("shortName", short_name)?,
        })
    }
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(MonoSocketError::MalformedLocator(format!(
            "missing query parameter '{}'",
            name
        ))),
    }
}

/// Free-function form of [`WidgetIdentity::parse`]
pub fn parse_widget_locator(locator: &str) -> Result<WidgetIdentity> {
    WidgetIdentity::parse(locator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_locator() {
        let identity =
            WidgetIdentity::parse("mono://x?token=abc&widgetId=W1&shortName=S1").unwrap();

        assert_eq!(
            identity,
            WidgetIdentity {
                channel_type: "mono".to_string(),
                auth_token: "abc".to_string(),
                widget_id: "W1".to_string(),
                short_name: "S1".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_any_order_with_extra_params() {
        let identity = WidgetIdentity::parse(
            "https://send.monobank.ua/widget?lang=uk&shortName=jar7&utm=1&token=t0k&widgetId=abc-123",
        )
        .unwrap();

        assert_eq!(identity.channel_type, "https");
        assert_eq!(identity.auth_token, "t0k");
        assert_eq!(identity.widget_id, "abc-123");
        assert_eq!(identity.short_name, "jar7");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let identity = WidgetIdentity::parse(
            "mono://x?token=first&token=second&widgetId=W&shortName=S&widgetId=Z",
        )
        .unwrap();

        assert_eq!(identity.auth_token, "first");
        assert_eq!(identity.widget_id, "W");
    }

    #[test]
    fn test_percent_encoded_values_are_decoded() {
        let identity =
            WidgetIdentity::parse("mono://x?token=a%2Bb&widgetId=W&shortName=S%20N").unwrap();

        assert_eq!(identity.auth_token, "a+b");
        assert_eq!(identity.short_name, "S N");
    }

    #[test]
    fn test_missing_each_required_param_fails() {
        let locators = [
            "mono://x?widgetId=W1&shortName=S1",
            "mono://x?token=abc&shortName=S1",
            "mono://x?token=abc&widgetId=W1",
        ];

        for locator in locators {
            match WidgetIdentity::parse(locator) {
                Err(MonoSocketError::MalformedLocator(_)) => {}
                other => panic!("expected MalformedLocator for {}, got {:?}", locator, other),
            }
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        assert!(matches!(
            WidgetIdentity::parse("mono://x?token=&widgetId=W1&shortName=S1"),
            Err(MonoSocketError::MalformedLocator(_))
        ));
    }

    #[test]
    fn test_unparsable_locator_fails() {
        assert!(matches!(
            parse_widget_locator("your_widget_url_here"),
            Err(MonoSocketError::MalformedLocator(_))
        ));
        assert!(matches!(
            parse_widget_locator(""),
            Err(MonoSocketError::MalformedLocator(_))
        ));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let locator = "mono://x?token=abc&widgetId=W1&shortName=S1";
        assert_eq!(
            WidgetIdentity::parse(locator).unwrap(),
            WidgetIdentity::parse(locator).unwrap()
        );
    }
}
