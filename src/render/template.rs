//! A minimal placeholder template.
//!
//! Placeholders are written `{{ value }}`, `{{ function value }}` or
//! `{{ todayDate }}`. Everything outside `{{ ... }}` is copied verbatim.

use chrono::NaiveDate;
use std::str::FromStr;

use super::format::Formatters;
use crate::aggregate::AggregateSummary;
use crate::error::RenderError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value {
    DownloadCount,
    Quality,
    Coverage,
    PackageCount,
}

impl Value {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "downloadCount" | "downloadsCount" | ".DownloadCount" => Some(Value::DownloadCount),
            "quality" | "avgQuality" | ".Quality" => Some(Value::Quality),
            "coverage" | "codeCov" | ".Coverage" => Some(Value::Coverage),
            "packageCount" | ".PackageCount" => Some(Value::PackageCount),
            _ => None,
        }
    }

    fn is_count(self) -> bool {
        matches!(self, Value::DownloadCount | Value::PackageCount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    FormatNumber,
    FormatPercent,
    TodayDate,
}

impl Function {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "formatNumber" => Some(Function::FormatNumber),
            "formatPercent" => Some(Function::FormatPercent),
            "todayDate" => Some(Function::TodayDate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Value(Value),
    Today,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl FromStr for Template {
    type Err = RenderError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }

            let inner_start = start + OPEN.len();
            let end = rest[inner_start..].find(CLOSE).ok_or_else(|| {
                RenderError::Template(format!("unclosed placeholder at byte {}", offset + start))
            })?;

            let expr = &rest[inner_start..inner_start + end];
            segments.push(parse_expr(expr, offset + start)?);

            let consumed = inner_start + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }
}

fn parse_expr(expr: &str, at: usize) -> Result<Segment, RenderError> {
    let err = |msg: String| RenderError::Template(format!("{} at byte {}", msg, at));
    let tokens: Vec<&str> = expr.split_whitespace().collect();

    match tokens.as_slice() {
        [] => Err(err("empty placeholder".to_string())),
        [name] => {
            if let Some(value) = Value::parse(name) {
                return Ok(Segment::Value(value));
            }
            match Function::parse(name) {
                Some(Function::TodayDate) => Ok(Segment::Today),
                Some(_) => Err(err(format!("`{}` expects one argument", name))),
                None => Err(err(format!("unknown placeholder `{}`", name))),
            }
        }
        [function, argument] => {
            let f = Function::parse(function)
                .ok_or_else(|| err(format!("unknown function `{}`", function)))?;
            let value = Value::parse(argument)
                .ok_or_else(|| err(format!("unknown value `{}`", argument)))?;
            match f {
                Function::TodayDate => Err(err("`todayDate` takes no arguments".to_string())),
                Function::FormatNumber if !value.is_count() => {
                    Err(err(format!("`formatNumber` cannot format `{}`", argument)))
                }
                Function::FormatPercent if value.is_count() => {
                    Err(err(format!("`formatPercent` cannot format `{}`", argument)))
                }
                _ => Ok(Segment::Value(value)),
            }
        }
        _ => Err(err(format!("too many arguments in `{}`", expr.trim()))),
    }
}

impl Template {
    /// Substitutes every placeholder. Cannot fail once the template parsed.
    pub fn render(
        &self,
        summary: &AggregateSummary,
        formatters: &Formatters,
        today: NaiveDate,
    ) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Value(value) => out.push_str(&format_value(*value, summary, formatters)),
                Segment::Today => out.push_str(&(formatters.today_date)(today)),
            }
        }
        out
    }
}

fn format_value(value: Value, summary: &AggregateSummary, formatters: &Formatters) -> String {
    match value {
        Value::DownloadCount => (formatters.format_number)(summary.total_download_count),
        Value::PackageCount => (formatters.format_number)(summary.package_count as u64),
        Value::Quality => (formatters.format_percent)(summary.average_quality_percent),
        Value::Coverage => (formatters.format_percent)(summary.average_coverage_percent),
    }
}
