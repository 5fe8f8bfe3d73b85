/// JSON reports for conversions and width measurements.

use serde::Serialize;

use crate::core::{ErrorPolicy, Kind, Outcome, UnitBuf, WidthError};

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub from: String,
    pub to: String,
    pub policy: String,
    pub input_units: usize,
    pub output_units: usize,
    pub valid: bool,
}

impl ConversionReport {
    pub fn new(
        from: Kind,
        to: Kind,
        policy: ErrorPolicy,
        input: &UnitBuf,
        outcome: &Outcome<UnitBuf>,
    ) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            policy: policy.to_string(),
            input_units: input.len(),
            output_units: outcome.value.len(),
            valid: outcome.is_valid,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineWidth {
    /// 1-based line number.
    pub line: usize,
    pub width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WidthReport {
    pub source: String,
    pub encoding: String,
    pub lines: Vec<LineWidth>,
    /// Widest measurable line.
    pub max_width: usize,
}

impl WidthReport {
    pub fn new(source: &str, encoding: Kind) -> Self {
        Self {
            source: source.into(),
            encoding: encoding.to_string(),
            lines: Vec::new(),
            max_width: 0,
        }
    }

    pub fn push(&mut self, measured: Result<usize, WidthError>) {
        let line = self.lines.len() + 1;
        let entry = match measured {
            Ok(width) => {
                self.max_width = self.max_width.max(width);
                LineWidth { line, width: Some(width), error: None }
            }
            Err(e) => LineWidth { line, width: None, error: Some(e.to_string()) },
        };
        self.lines.push(entry);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
