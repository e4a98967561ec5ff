//! Assertion scripts attached to requests.
//!
//! Postman stores scripts as an array of source lines. Each assertion is a
//! `pm.test(...)` block; consecutive blocks are separated by a blank line.

use crate::model::{Event, Listen, Script};

const INDENT: &str = "    ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestScript {
    lines: Vec<String>,
}

impl TestScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(self, code: u16) -> Self {
        self.block(
            &format!("Status code is {}", code),
            &[format!("pm.response.to.have.status({});", code)],
        )
    }

    pub fn response_time_below(self, title: &str, millis: u32) -> Self {
        self.block(
            title,
            &[format!(
                "pm.expect(pm.response.responseTime).to.be.below({});",
                millis
            )],
        )
    }

    pub fn json_is_array(self, title: &str) -> Self {
        self.block(
            title,
            &[
                "var jsonData = pm.response.json();".to_string(),
                "pm.expect(jsonData).to.be.an('array');".to_string(),
            ],
        )
    }

    pub fn field_exists(self, title: &str, field: &str) -> Self {
        self.block(
            title,
            &[
                "var jsonData = pm.response.json();".to_string(),
                format!("pm.expect(jsonData.{}).to.exist;", field),
            ],
        )
    }

    /// `expected` is emitted verbatim as a JavaScript literal.
    pub fn field_equals(self, title: &str, field: &str, expected: &str) -> Self {
        self.block(
            title,
            &[
                "var jsonData = pm.response.json();".to_string(),
                format!("pm.expect(jsonData.{}).to.eql({});", field, expected),
            ],
        )
    }

    pub fn response_is_json(self) -> Self {
        self.block(
            "Response has valid JSON",
            &["pm.response.to.be.json;".to_string()],
        )
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_event(self) -> Event {
        Event {
            listen: Listen::Test,
            script: Script::javascript(self.lines),
        }
    }

    fn block(mut self, title: &str, body: &[String]) -> Self {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines
            .push(format!("pm.test(\"{}\", function () {{", title));
        self.lines
            .extend(body.iter().map(|line| format!("{}{}", INDENT, line)));
        self.lines.push("});".to_string());
        self
    }
}
