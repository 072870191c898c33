//! Field-level input validation.
//!
//! Each validator collects every violation instead of stopping at the
//! first one, and reports them together as
//! [`ScribeError::Validation`].

use std::sync::LazyLock;

use regex::Regex;
use scribe_core::error::{ScribeError, ScribeResult};

use crate::input::{
    NewAccountInput, NewCommentInput, PostInput, UpdateAccountInput, UpdateCommentInput,
};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_TEXT_LENGTH: usize = 3;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn min_len(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.0
                .push(format!("{field} must be at least {min} characters"));
        }
        self
    }

    fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !EMAIL.is_match(value) {
            self.0.push(format!("{field} must be a valid email address"));
        }
        self
    }

    fn finish(&mut self) -> ScribeResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ScribeError::Validation {
                messages: std::mem::take(&mut self.0),
            })
        }
    }
}

pub fn new_account(input: &NewAccountInput, min_password_length: usize) -> ScribeResult<()> {
    Violations::default()
        .min_len("name", &input.name, MIN_NAME_LENGTH)
        .min_len("password", &input.password, min_password_length)
        .email("email", &input.email)
        .finish()
}

pub fn update_account(input: &UpdateAccountInput, min_password_length: usize) -> ScribeResult<()> {
    Violations::default()
        .min_len("password", &input.password, min_password_length)
        .email("email", &input.email)
        .finish()
}

pub fn post(input: &PostInput) -> ScribeResult<()> {
    Violations::default()
        .min_len("title", &input.title, MIN_TEXT_LENGTH)
        .min_len("content", &input.content, MIN_TEXT_LENGTH)
        .finish()
}

pub fn new_comment(input: &NewCommentInput) -> ScribeResult<()> {
    let mut violations = Violations::default();
    if input.post_id.is_nil() {
        violations.0.push("post_id is required".into());
    }
    violations
        .min_len("content", &input.content, MIN_TEXT_LENGTH)
        .finish()
}

pub fn update_comment(input: &UpdateCommentInput) -> ScribeResult<()> {
    Violations::default()
        .min_len("content", &input.content, MIN_TEXT_LENGTH)
        .finish()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn messages(result: ScribeResult<()>) -> Vec<String> {
        match result {
            Err(ScribeError::Validation { messages }) => messages,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_account_passes() {
        let input = NewAccountInput {
            name: "alice".into(),
            password: "secret1".into(),
            email: "alice@example.com".into(),
        };
        assert!(new_account(&input, 6).is_ok());
    }

    #[test]
    fn every_account_violation_is_reported() {
        let input = NewAccountInput {
            name: "al".into(),
            password: "123".into(),
            email: "not-an-email".into(),
        };
        let messages = messages(new_account(&input, 6));
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("name"));
        assert!(messages[1].starts_with("password"));
        assert!(messages[2].starts_with("email"));
    }

    #[test]
    fn email_shapes() {
        for ok in ["a@b.co", "first.last@sub.example.org"] {
            assert!(EMAIL.is_match(ok), "{ok} should be accepted");
        }
        for bad in ["", "a@b", "@b.com", "a b@c.com", "a@@b.com"] {
            assert!(!EMAIL.is_match(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let input = PostInput {
            title: "äöü".into(),
            content: "ok!".into(),
        };
        assert!(post(&input).is_ok());
    }

    #[test]
    fn comment_requires_post_and_content() {
        let input = NewCommentInput {
            post_id: Uuid::nil(),
            content: "no".into(),
        };
        assert_eq!(messages(new_comment(&input)).len(), 2);

        let input = UpdateCommentInput {
            content: "fine".into(),
        };
        assert!(update_comment(&input).is_ok());
    }
}
