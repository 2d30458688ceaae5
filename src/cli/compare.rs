//! Compare subcommand: explain the ordering of two candidates.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use std::cmp::Ordering;
use std::io::Write;
use std::path::PathBuf;

use crate::definition::{QualifierComparator, RawDefinition, ReservedKeys, validate};
use crate::format::format_conditions;
use crate::source::read_documents;

/// Arguments for the compare subcommand
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Definition file
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Definition name
    #[arg(short, long)]
    pub name: String,

    /// Index of the first candidate, in input order
    #[arg(value_name = "I")]
    pub first: usize,

    /// Index of the second candidate, in input order
    #[arg(value_name = "J")]
    pub second: usize,
}

/// Run the compare subcommand.
pub fn run(args: &CompareArgs, keys: &ReservedKeys, out: &mut impl Write) -> Result<()> {
    let mut raw = None;
    for document in read_documents(&args.path)? {
        let candidate = RawDefinition::extract(&document, keys)
            .with_context(|| format!("{}", args.path.display()))?;
        if candidate.name == args.name {
            raw = Some(candidate);
            break;
        }
    }
    let raw = raw.ok_or_else(|| {
        anyhow!("No definition named '{}' in {}", args.name, args.path.display())
    })?;

    // the comparator is only meaningful on validated input
    validate(raw.values.as_deref(), raw.schema.as_ref())
        .with_context(|| format!("definition '{}'", raw.name))?;

    let values = raw.values.unwrap_or_default();
    let pick = |i: usize| {
        values.get(i).ok_or_else(|| {
            anyhow!("Candidate index {} out of range ({} candidates)", i, values.len())
        })
    };
    let (a, b) = (pick(args.first)?, pick(args.second)?);

    let comparator = QualifierComparator::new(raw.schema.clone().unwrap_or_default());
    let (ordering, rule) = comparator.explain(a, b);
    let symbol = match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };

    writeln!(out, "#{}  '{}'  {}", args.first, a.value(), format_conditions(a))?;
    writeln!(out, "#{}  '{}'  {}", args.second, b.value(), format_conditions(b))?;
    writeln!(out, "#{} {} #{} (decided by {})", args.first, symbol, args.second, rule)?;
    Ok(())
}
