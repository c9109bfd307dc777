//! Pipeline parameter flags, generated from the declaration table.

use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};

use crate::domain::{AppError, ParameterSpec, ParameterTable, ParameterValues};

const UNSET_ARG: &str = "unset";

/// Raw `--<param> <value>` inputs and `--unset <param>` requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineArgs {
    values: Vec<(String, String)>,
    unset: Vec<String>,
}

impl PipelineArgs {
    /// Declared defaults, overlaid with given values, minus unset names.
    pub fn resolve(&self, table: &ParameterTable) -> Result<ParameterValues, AppError> {
        let mut values = table.defaults();
        for (name, raw) in &self.values {
            values.set_raw(table, name, raw)?;
        }
        for name in &self.unset {
            values.unset(name)?;
        }
        Ok(values)
    }
}

fn help_text(spec: &ParameterSpec) -> String {
    match &spec.default {
        Some(default) => format!("{} [default: {}]", spec.description, default),
        None if !spec.optional => format!("{} (required)", spec.description),
        None => spec.description.clone(),
    }
}

impl FromArgMatches for PipelineArgs {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let table = ParameterTable::omicsgenetraitassociation();
        let values = table
            .iter()
            .filter_map(|spec| {
                matches.get_one::<String>(&spec.name).map(|raw| (spec.name.clone(), raw.clone()))
            })
            .collect();
        let unset = matches
            .get_many::<String>(UNSET_ARG)
            .map(|names| names.cloned().collect())
            .unwrap_or_default();

        Ok(Self { values, unset })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

impl Args for PipelineArgs {
    fn augment_args(cmd: Command) -> Command {
        let table = ParameterTable::omicsgenetraitassociation();
        let optional = table.iter().filter(|spec| spec.optional).map(|spec| spec.name.clone());

        let mut cmd = cmd.arg(
            Arg::new(UNSET_ARG)
                .long(UNSET_ARG)
                .value_name("PARAM")
                .action(ArgAction::Append)
                .value_parser(PossibleValuesParser::new(optional.map(PossibleValue::new)))
                .help("Leave an optional parameter off the pipeline command line"),
        );

        let mut heading: Option<String> = None;
        for spec in table.iter() {
            if spec.section_title.is_some() {
                heading = spec.section_title.clone();
            }

            let mut arg = Arg::new(spec.name.clone())
                .long(spec.name.clone())
                .value_name(spec.ty.as_str().to_uppercase())
                .action(ArgAction::Set)
                .help(help_text(spec));
            if let Some(heading) = &heading {
                arg = arg.help_heading(heading.clone());
            }
            cmd = cmd.arg(arg);
        }
        cmd
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

/// Plain-text listing of the declared parameters, grouped by section.
pub fn render_parameters(table: &ParameterTable) -> String {
    let mut out = String::new();
    for spec in table.iter() {
        if let Some(section) = &spec.section_title {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(section);
            out.push('\n');
        }

        let ty = if spec.optional {
            format!("{}?", spec.ty.as_str())
        } else {
            spec.ty.as_str().to_string()
        };
        out.push_str(&format!("  --{} <{}>  {}", spec.name, ty, help_text(spec)));
        if spec.output {
            out.push_str(" (output)");
        }
        out.push('\n');
    }
    out
}
