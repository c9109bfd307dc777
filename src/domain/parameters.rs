//! Workflow parameter declarations and resolved values.
//!
//! The declaration table is the single source for both CLI flag generation
//! and default argument values. Declaration order is preserved everywhere.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::AppError;

/// Value type of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Float,
    Boolean,
    /// Path-like directory reference (local path or remote URL).
    Directory,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Integer => "int",
            ParameterType::Float => "float",
            ParameterType::Boolean => "bool",
            ParameterType::Directory => "dir",
        }
    }

    /// Parse a raw input string into a value of this type.
    pub fn parse(&self, raw: &str) -> Result<ParameterValue, String> {
        match self {
            ParameterType::String => Ok(ParameterValue::String(raw.to_string())),
            ParameterType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(ParameterValue::Integer)
                .map_err(|e| format!("expected an integer ({})", e)),
            ParameterType::Float => raw
                .trim()
                .parse::<f64>()
                .map(ParameterValue::Float)
                .map_err(|e| format!("expected a number ({})", e)),
            ParameterType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(ParameterValue::Boolean(true)),
                "false" => Ok(ParameterValue::Boolean(false)),
                other => Err(format!("expected true or false, got '{}'", other)),
            },
            ParameterType::Directory => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err("directory location must not be empty".to_string());
                }
                Ok(ParameterValue::Directory(trimmed.to_string()))
            }
        }
    }
}

/// A concrete parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Directory(String),
}

impl ParameterValue {
    pub fn string(value: impl Into<String>) -> Self {
        ParameterValue::String(value.into())
    }

    pub fn directory(location: impl Into<String>) -> Self {
        ParameterValue::Directory(location.into())
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::String(s) | ParameterValue::Directory(s) => f.write_str(s),
            ParameterValue::Integer(i) => write!(f, "{}", i),
            ParameterValue::Float(v) => f.write_str(&format_float(*v)),
            ParameterValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Shortest round-trip text for a float, in the layout the pipeline expects.
///
/// Decimal exponents below -4 or from 16 up use scientific notation with a
/// signed two-digit exponent (`1e-07`, `1.5e+20`); whole values otherwise
/// keep a trailing `.0`.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("{:.1}", value);
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// A declared workflow parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ParameterType,
    pub optional: bool,
    pub default: Option<ParameterValue>,
    pub section_title: Option<String>,
    pub description: String,
    /// Marks the directory the pipeline writes its results to.
    pub output: bool,
}

impl ParameterSpec {
    fn optional(name: &str, ty: ParameterType, default: Option<ParameterValue>) -> Self {
        Self {
            name: name.to_string(),
            ty,
            optional: true,
            default,
            section_title: None,
            description: String::new(),
            output: false,
        }
    }

    fn required(name: &str, ty: ParameterType) -> Self {
        Self { optional: false, ..Self::optional(name, ty, None) }
    }

    fn section(mut self, title: &str) -> Self {
        self.section_title = Some(title.to_string());
        self
    }

    fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn as_output(mut self) -> Self {
        self.output = true;
        self
    }
}

/// Ordered parameter declarations keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterTable {
    specs: IndexMap<String, ParameterSpec>,
}

impl ParameterTable {
    pub fn new(specs: impl IntoIterator<Item = ParameterSpec>) -> Self {
        Self { specs: specs.into_iter().map(|spec| (spec.name.clone(), spec)).collect() }
    }

    /// Parameters of the nf-core/omicsgenetraitassociation pipeline.
    pub fn omicsgenetraitassociation() -> Self {
        use ParameterType as T;

        let text = ParameterValue::string;
        Self::new([
            ParameterSpec::optional("gene_col_name", T::String, Some(text("markname")))
                .section("MEA options")
                .describe("Column name for gene ID/names"),
            ParameterSpec::optional("pval_col_name", T::String, Some(text("meta_p")))
                .describe("Column name for p-values"),
            ParameterSpec::optional("numtests", T::Integer, Some(ParameterValue::Integer(17551)))
                .describe("Number of tests for multiple testing"),
            ParameterSpec::optional("alpha", T::Float, Some(ParameterValue::Float(0.05)))
                .describe("P-value threshold alpha value"),
            ParameterSpec::optional("mmap_header", T::Integer, Some(ParameterValue::Integer(1)))
                .section("MMAP options")
                .describe("Whether MMAP output has a header or not"),
            ParameterSpec::optional("mmap_pval_col", T::String, Some(text("p_vals")))
                .describe("Column name or number for p-values"),
            ParameterSpec::optional("mmap_beta_col", T::String, Some(text("betas_genes")))
                .describe("Column name or number for Beta values"),
            ParameterSpec::optional("mmap_se_genes", T::String, Some(text("se_genes")))
                .describe("Column name or number for SE values"),
            ParameterSpec::optional("pascal_header", T::Integer, Some(ParameterValue::Integer(0)))
                .section("PASCAL options")
                .describe("Whether PASCAL output has a header or not"),
            ParameterSpec::optional("pascal_pval_col", T::Integer, Some(ParameterValue::Integer(1)))
                .describe("Column name or number for p-values"),
            ParameterSpec::required("input", T::String)
                .section("Input/output options")
                .describe("path to samplesheet"),
            ParameterSpec::optional("outdir", T::Directory, None)
                .describe("output directory")
                .as_output(),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.specs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Values holding every declared default.
    pub fn defaults(&self) -> ParameterValues {
        ParameterValues {
            values: self.iter().map(|spec| (spec.name.clone(), spec.default.clone())).collect(),
        }
    }

    /// Values with nothing set.
    pub fn empty_values(&self) -> ParameterValues {
        ParameterValues { values: self.iter().map(|spec| (spec.name.clone(), None)).collect() }
    }
}

/// Resolved parameter values for one invocation, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterValues {
    values: IndexMap<String, Option<ParameterValue>>,
}

impl ParameterValues {
    /// Parse and store a raw value for a declared parameter.
    pub fn set_raw(
        &mut self,
        table: &ParameterTable,
        name: &str,
        raw: &str,
    ) -> Result<(), AppError> {
        let spec = table.get(name).ok_or_else(|| AppError::UnknownParameter(name.to_string()))?;
        let value = spec
            .ty
            .parse(raw)
            .map_err(|details| AppError::InvalidParameter { name: name.to_string(), details })?;
        self.set(name, Some(value))
    }

    /// Store a typed value (or clear it with `None`).
    pub fn set(&mut self, name: &str, value: Option<ParameterValue>) -> Result<(), AppError> {
        let slot =
            self.values.get_mut(name).ok_or_else(|| AppError::UnknownParameter(name.to_string()))?;
        *slot = value;
        Ok(())
    }

    pub fn unset(&mut self, name: &str) -> Result<(), AppError> {
        self.set(name, None)
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Present values in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values.iter().filter_map(|(name, value)| value.as_ref().map(|v| (name.as_str(), v)))
    }

    /// Fail when a non-optional parameter has no value.
    pub fn ensure_required(&self, table: &ParameterTable) -> Result<(), AppError> {
        match table.iter().find(|spec| !spec.optional && self.get(&spec.name).is_none()) {
            Some(spec) => Err(AppError::MissingParameter(spec.name.clone())),
            None => Ok(()),
        }
    }
}
