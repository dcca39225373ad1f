//! The normalized email-send request handed to every provider.
//!
//! [`EmailRequest`] is deserialized from the camelCase JSON body of
//! `POST /api/emails` (and the signed webhook). Every field defaults when
//! absent so an incomplete body surfaces through [`EmailRequest::validate`]
//! rather than as a deserialization crash.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailRequest {
    pub from_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl EmailRequest {
    /// Check the request is deliverable in principle.
    ///
    /// Requires a sender address with exactly one `@` that is neither the
    /// first nor the last character, at least one recipient, a subject,
    /// and a non-empty `text` or `html` body.
    #[must_use]
    pub fn validate(&self) -> bool {
        is_email(&self.from_email)
            && !self.to.is_empty()
            && !self.subject.is_empty()
            && !(self.html.is_empty() && self.text.is_empty())
    }

    /// Display name for the sender, falling back to the address.
    #[must_use]
    pub fn sender_name(&self) -> &str {
        match self.from_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.from_email,
        }
    }

    /// `"Name <address>"` mailbox form of the sender.
    #[must_use]
    pub fn sender_mailbox(&self) -> String {
        format!("{} <{}>", self.sender_name(), self.from_email)
    }

    /// Body used when only one part can be sent: html wins over text.
    #[must_use]
    pub fn preferred_body(&self) -> &str {
        if self.html.is_empty() {
            &self.text
        } else {
            &self.html
        }
    }
}

/// Single `@`, not at either edge. Local part and domain are not checked further.
fn is_email(s: &str) -> bool {
    let mut at = None;
    for (i, c) in s.char_indices() {
        if c == '@' {
            if at.is_some() {
                return false;
            }
            at = Some(i);
        }
    }
    matches!(at, Some(i) if i > 0 && i + 1 < s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> EmailRequest {
        EmailRequest {
            from_email: "a@b.com".into(),
            from_name: None,
            to: vec!["x@y.com".into()],
            subject: "hi".into(),
            text: String::new(),
            html: "<p>hi</p>".into(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid().validate());
    }

    #[test]
    fn sender_without_at_fails() {
        let req = EmailRequest {
            from_email: "ab.com".into(),
            ..valid()
        };
        assert!(!req.validate());
    }

    #[test]
    fn sender_with_leading_at_fails() {
        let req = EmailRequest {
            from_email: "@b.com".into(),
            ..valid()
        };
        assert!(!req.validate());
    }

    #[test]
    fn sender_with_trailing_at_fails() {
        let req = EmailRequest {
            from_email: "a@".into(),
            ..valid()
        };
        assert!(!req.validate());
    }

    #[test]
    fn sender_with_two_ats_fails() {
        let req = EmailRequest {
            from_email: "a@b@c".into(),
            ..valid()
        };
        assert!(!req.validate());
    }

    #[test]
    fn empty_sender_fails() {
        let req = EmailRequest {
            from_email: String::new(),
            ..valid()
        };
        assert!(!req.validate());
    }

    #[test]
    fn no_recipients_fails() {
        let req = EmailRequest {
            to: vec![],
            ..valid()
        };
        assert!(!req.validate());
    }

    #[test]
    fn empty_subject_fails() {
        let req = EmailRequest {
            subject: String::new(),
            ..valid()
        };
        assert!(!req.validate());
    }

    #[test]
    fn both_bodies_empty_fails() {
        let req = EmailRequest {
            html: String::new(),
            text: String::new(),
            ..valid()
        };
        assert!(!req.validate());
    }

    #[test]
    fn text_only_passes() {
        let req = EmailRequest {
            html: String::new(),
            text: "hello".into(),
            ..valid()
        };
        assert!(req.validate());
    }

    #[test]
    fn missing_fields_deserialize_then_fail_validation() {
        let req: EmailRequest = serde_json::from_str(r#"{"fromEmail":"a@b.com"}"#).unwrap();
        assert!(req.to.is_empty());
        assert!(!req.validate());
    }

    #[test]
    fn camel_case_fields_deserialize() {
        let req: EmailRequest = serde_json::from_str(
            r#"{"fromEmail":"a@b.com","fromName":"Ann","to":["x@y.com"],"subject":"s","text":"t","html":""}"#,
        )
        .unwrap();
        assert_eq!(req.from_name.as_deref(), Some("Ann"));
        assert!(req.validate());
    }

    #[test]
    fn sender_name_falls_back_to_address() {
        assert_eq!(valid().sender_name(), "a@b.com");
        let named = EmailRequest {
            from_name: Some("Ann".into()),
            ..valid()
        };
        assert_eq!(named.sender_mailbox(), "Ann <a@b.com>");
        let blank = EmailRequest {
            from_name: Some(String::new()),
            ..valid()
        };
        assert_eq!(blank.sender_name(), "a@b.com");
    }

    #[test]
    fn preferred_body_picks_html_first() {
        assert_eq!(valid().preferred_body(), "<p>hi</p>");
        let text_only = EmailRequest {
            html: String::new(),
            text: "plain".into(),
            ..valid()
        };
        assert_eq!(text_only.preferred_body(), "plain");
    }
}
