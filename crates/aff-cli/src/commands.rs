use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use tracing::{info, info_span};

use aff_cli::batch::{BatchOptions, BatchSummary, OutputFormat, run_batch};
use aff_lookup::{LookupTables, states_from_reference, topics_from_facets};
use aff_transform::{SupportStatus, Transformer, default_registry};

use crate::cli::{BuildDataArgs, ConvertArgs, OutputArg};

pub fn run_convert(args: &ConvertArgs) -> Result<BatchSummary> {
    let tables = load_tables(args.data.as_deref())?;
    let transformer = Transformer::new(&tables);
    let options = BatchOptions {
        strict: args.strict,
        output: match args.output {
            OutputArg::Url => OutputFormat::Url,
            OutputArg::Json => OutputFormat::Json,
        },
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if args.urls.is_empty() {
        let lines = io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("read links from stdin")?;
        run_batch(&transformer, lines, options, &mut out)
    } else {
        run_batch(&transformer, &args.urls, options, &mut out)
    };
    let summary = written.context("write converted links")?;
    out.flush().context("flush stdout")?;
    Ok(summary)
}

fn load_tables(path: Option<&Path>) -> Result<LookupTables> {
    match path {
        Some(path) => LookupTables::from_path(path)
            .with_context(|| format!("load lookup document {}", path.display())),
        None => LookupTables::embedded().context("load built-in lookup document"),
    }
}

pub fn run_programs() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Program"),
        header_cell("Status"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    for resolver in default_registry().iter() {
        let status = resolver.status();
        table.add_row(vec![
            Cell::new(resolver.program_code()).add_attribute(Attribute::Bold),
            Cell::new(status).fg(status_color(status)),
            Cell::new(resolver.description()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_build_data(args: &BuildDataArgs) -> Result<()> {
    let span = info_span!("build_data", facets = %args.facets.display());
    let _guard = span.enter();

    let facets = fs::read_to_string(&args.facets)
        .with_context(|| format!("read facet tree {}", args.facets.display()))?;
    let facets: serde_json::Value = serde_json::from_str(&facets)
        .with_context(|| format!("parse facet tree {}", args.facets.display()))?;
    let states = fs::read_to_string(&args.states)
        .with_context(|| format!("read state reference {}", args.states.display()))?;
    let states = states_from_reference(&states, &args.states.display().to_string())?;

    let tables = LookupTables::new(topics_from_facets(&facets), states);
    let document = tables.to_json_pretty()?;
    match &args.out {
        Some(path) => fs::write(path, document)
            .with_context(|| format!("write lookup document {}", path.display()))?,
        None => println!("{document}"),
    }
    info!(
        topics = tables.topics.len(),
        states = tables.states.len(),
        "lookup document built"
    );
    Ok(())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_color(status: SupportStatus) -> Color {
    match status {
        SupportStatus::Partial => Color::Green,
        SupportStatus::Pending => Color::Yellow,
        SupportStatus::ExternalSystem => Color::Blue,
        SupportStatus::NeverMigrated => Color::DarkGrey,
    }
}
