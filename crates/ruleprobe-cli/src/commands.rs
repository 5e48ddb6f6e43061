//! Subcommand implementations.

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::{debug, info_span};

use ruleprobe_model::{RuleArg, SourceKind, TypeDescriptor, TypeKind, Value};
use ruleprobe_source::SourceRegistry;
use ruleprobe_validate::ValidatorOptions;

use crate::cli::ValuesArgs;

/// One row of the `kinds` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindRow {
    pub kind: SourceKind,
    pub description: &'static str,
    pub takes_bound: bool,
    pub types: Vec<TypeKind>,
}

pub fn run_values(args: &ValuesArgs) -> Result<()> {
    let kind = SourceKind::parse(&args.kind)
        .ok_or_else(|| anyhow!("unknown source kind: {}", args.kind))?;
    let ty = parse_type(&args.type_name, &args.elements, args.optional)?;
    let seed = args.seed.or_else(|| ValidatorOptions::from_env().seed);

    let span = info_span!("values", kind = %kind, ty = %ty);
    let _guard = span.enter();
    let values = preview(kind, &ty, args.bound, seed, args.limit)?;

    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Value"), header_cell("Kind")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, value) in values.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(value.to_string()),
            Cell::new(value.kind_name()).fg(Color::DarkGrey),
        ]);
    }
    println!("{kind} for {ty}");
    if values.is_empty() {
        println!("(no values)");
    } else {
        println!("{table}");
    }
    Ok(())
}

pub fn run_kinds() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Description"),
        header_cell("Bound"),
        header_cell("Types"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for row in kind_rows(&SourceRegistry::new()) {
        let types: Vec<&str> = row.types.iter().map(TypeKind::label).collect();
        table.add_row(vec![
            Cell::new(row.kind.label()).add_attribute(Attribute::Bold),
            Cell::new(row.description),
            Cell::new(if row.takes_bound { "yes" } else { "-" }),
            Cell::new(if types.is_empty() {
                "(none)".to_string()
            } else {
                types.join(", ")
            }),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_options() -> Result<()> {
    let options = ValidatorOptions::from_env();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Option"), header_cell("Value")]);
    apply_table_style(&mut table);
    let exempt: Vec<&str> = options.non_aggregate_types.iter().collect();
    table.add_row(vec![
        "violation policy".to_string(),
        options.violation_policy.to_string(),
    ]);
    table.add_row(vec![
        "nullable spellings".to_string(),
        options.nullable_spellings.join(", "),
    ]);
    table.add_row(vec![
        "seed".to_string(),
        options
            .seed
            .map_or_else(|| "(entropy)".to_string(), |seed| seed.to_string()),
    ]);
    table.add_row(vec!["non-aggregate types".to_string(), exempt.join(", ")]);
    println!("{table}");
    Ok(())
}

/// Builds a declared type from a kind label and its element labels.
pub fn parse_type(name: &str, elements: &[String], optional: bool) -> Result<TypeDescriptor> {
    let kind = parse_kind(name)?;
    let params = elements
        .iter()
        .map(|element| parse_kind(element).map(TypeDescriptor::new))
        .collect::<Result<Vec<_>>>()?;

    let expected = match kind {
        TypeKind::List | TypeKind::Set | TypeKind::Array => 1,
        TypeKind::Map => 2,
        _ => 0,
    };
    if params.len() != expected {
        bail!(
            "type {name} takes {expected} element type(s), got {}",
            params.len()
        );
    }

    let ty = TypeDescriptor::new(kind).with_params(params);
    Ok(if optional { ty.optional() } else { ty })
}

fn parse_kind(name: &str) -> Result<TypeKind> {
    TypeKind::parse(name).ok_or_else(|| anyhow!("unknown type: {name}"))
}

/// Up to `limit` candidates of `kind` for `ty`.
pub fn preview(
    kind: SourceKind,
    ty: &TypeDescriptor,
    bound: Option<i64>,
    seed: Option<u64>,
    limit: usize,
) -> Result<Vec<Value>> {
    let mut registry = SourceRegistry::new();
    registry.set_seed(seed);
    let args: Vec<RuleArg> = bound.map(RuleArg::Int).into_iter().collect();
    let values: Vec<Value> = registry
        .values(kind, ty, &args)
        .with_context(|| format!("generate {kind} values for {ty}"))?
        .take(limit)
        .collect();
    debug!(count = values.len(), "generated values");
    Ok(values)
}

pub fn kind_rows(registry: &SourceRegistry) -> Vec<KindRow> {
    SourceKind::all()
        .iter()
        .map(|kind| KindRow {
            kind: *kind,
            description: kind.description(),
            takes_bound: kind.takes_bound(),
            types: registry.registered_types(*kind),
        })
        .collect()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
