//! The `memtrain inspect` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use memtrain_core::alias::build_aliases;
use memtrain_core::store::ingest;
use memtrain_core::table::read_table;

pub fn execute(csvfile: PathBuf, json: bool) -> Result<()> {
    let rows = read_table(&csvfile)?;
    let (settings, store) =
        ingest(&rows).with_context(|| format!("cannot load {}", csvfile.display()))?;
    let counts = store.counts();
    let aliases = build_aliases(store.responses().map(|(_, text)| text));

    if json {
        let value = serde_json::json!({
            "settings": settings,
            "counts": counts,
            "aliases": aliases.len(),
            "unaliased": aliases.unaliased(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Label", "Parameter"]);
    for (label, value) in settings.rows() {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec!["Entity", "Count"]);
    for (name, count) in [
        ("cues", counts.cues),
        ("responses", counts.responses),
        ("links", counts.links),
        ("synonyms", counts.synonyms),
        ("hints", counts.hints),
        ("tags", counts.tags),
        ("mixing tags", counts.mixing_tags),
        ("aliases", aliases.len()),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(count)]);
    }
    println!("{table}");

    if !aliases.unaliased().is_empty() {
        println!("Responses without an alias: {}", aliases.unaliased().join(", "));
    }

    Ok(())
}
