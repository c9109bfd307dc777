//! Nextflow command-line construction.

use std::fmt;
use std::path::PathBuf;

use crate::domain::config::RuntimeConfig;
use crate::domain::parameters::{ParameterValue, ParameterValues};

/// Flag tokens for one parameter: empty when the value is absent.
pub fn flag(name: &str, value: Option<&ParameterValue>) -> Vec<String> {
    match value {
        Some(value) => vec![format!("--{}", name), value.to_string()],
        None => Vec::new(),
    }
}

/// Ordered argv for the pipeline runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Fixed prefix followed by `--name value` for every present parameter.
    pub fn build(runtime: &RuntimeConfig, values: &ParameterValues) -> Self {
        let shared_dir = runtime.shared_dir.display().to_string();
        let script = runtime.shared_dir.join(&runtime.script).display().to_string();

        let mut args = vec![
            "run".to_string(),
            script,
            "-work-dir".to_string(),
            shared_dir,
            "-profile".to_string(),
            runtime.profile.clone(),
            "-c".to_string(),
            runtime.config_file.clone(),
        ];
        args.extend(values.present().flat_map(|(name, value)| flag(name, Some(value))));

        Self { program: runtime.executable.clone(), args }
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by every argument.
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameters::{ParameterTable, ParameterType};
    use proptest::prelude::*;

    const PREFIX_LEN: usize = 9;

    fn tail(command: &CommandLine) -> Vec<String> {
        command.tokens()[PREFIX_LEN..].to_vec()
    }

    #[test]
    fn prefix_matches_deployed_invocation() {
        let table = ParameterTable::omicsgenetraitassociation();
        let command = CommandLine::build(&RuntimeConfig::default(), &table.empty_values());
        assert_eq!(
            command.tokens(),
            vec![
                "/root/nextflow",
                "run",
                "/nf-workdir/main.nf",
                "-work-dir",
                "/nf-workdir",
                "-profile",
                "docker",
                "-c",
                "latch.config",
            ]
        );
    }

    #[test]
    fn scenario_omits_unset_parameters() {
        let table = ParameterTable::omicsgenetraitassociation();
        let mut values = table.empty_values();
        values.set_raw(&table, "input", "samples.csv").unwrap();
        values.set_raw(&table, "numtests", "17551").unwrap();
        values.set_raw(&table, "alpha", "0.05").unwrap();
        values.set_raw(&table, "outdir", "s3://out/").unwrap();

        let command = CommandLine::build(&RuntimeConfig::default(), &values);
        assert_eq!(
            tail(&command).join(" "),
            "--numtests 17551 --alpha 0.05 --input samples.csv --outdir s3://out/"
        );
    }

    #[test]
    fn defaults_produce_every_optional_flag() {
        let table = ParameterTable::omicsgenetraitassociation();
        let mut values = table.defaults();
        values.set_raw(&table, "input", "samples.csv").unwrap();

        let command = CommandLine::build(&RuntimeConfig::default(), &values);
        let rendered = command.to_string();
        assert!(rendered.contains("--gene_col_name markname"));
        assert!(rendered.contains("--pascal_header 0"));
        assert!(!rendered.contains("--outdir"));
    }

    #[test]
    fn flag_is_empty_for_absent_value() {
        assert!(flag("alpha", None).is_empty());
        assert_eq!(flag("alpha", Some(&ParameterValue::Float(0.5))), vec!["--alpha", "0.5"]);
    }

    fn sample_value(ty: ParameterType, n: i64) -> ParameterValue {
        match ty {
            ParameterType::String => ParameterValue::string(format!("v{}", n)),
            ParameterType::Directory => ParameterValue::directory(format!("s3://bucket/{}", n)),
            ParameterType::Integer => ParameterValue::Integer(n),
            ParameterType::Float => ParameterValue::Float(n as f64 / 100.0),
            ParameterType::Boolean => ParameterValue::Boolean(n % 2 == 0),
        }
    }

    proptest! {
        #[test]
        fn present_parameters_appear_once_in_declaration_order(
            picks in proptest::collection::vec(proptest::option::of(0i64..10_000), 12)
        ) {
            let table = ParameterTable::omicsgenetraitassociation();
            let mut values = table.empty_values();
            let mut expected = Vec::new();

            for (spec, pick) in table.iter().zip(picks.iter()) {
                if let Some(n) = pick {
                    let value = sample_value(spec.ty, *n);
                    expected.push(format!("--{}", spec.name));
                    expected.push(value.to_string());
                    values.set(&spec.name, Some(value)).unwrap();
                }
            }

            let runtime = RuntimeConfig::default();
            let first = CommandLine::build(&runtime, &values);
            let second = CommandLine::build(&runtime, &values);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(tail(&first), expected);

            for spec in table.iter() {
                let flag = format!("--{}", spec.name);
                let count = first.args().iter().filter(|t| **t == flag).count();
                let present = values.get(&spec.name).is_some();
                prop_assert_eq!(count, usize::from(present));
            }
        }
    }
}
