//! The `memtrain init` command.

use std::path::Path;

use anyhow::{Context, Result};

const EXAMPLE_FILE: &str = "capitals.csv";

pub fn execute() -> Result<()> {
    let path = Path::new(EXAMPLE_FILE);
    if path.exists() {
        println!("{EXAMPLE_FILE} already exists, skipping.");
    } else {
        std::fs::write(path, EXAMPLE_TABLE)
            .with_context(|| format!("failed to write {EXAMPLE_FILE}"))?;
        println!("Created {EXAMPLE_FILE}");
    }

    println!("\nNext steps:");
    println!("  1. Run: memtrain inspect {EXAMPLE_FILE}");
    println!("  2. Run: memtrain train {EXAMPLE_FILE}");
    println!("  3. Try a harder level: memtrain train {EXAMPLE_FILE} --level 3");

    Ok(())
}

const EXAMPLE_TABLE: &str = r#"World capitals
"settings: nquestions=10"
Cue,Response,Synonym,Hint,Tag,Mtag
The capital of France is {{}}.,Paris,,City of light,europe,capitals
The capital of Germany is {{}}.,Berlin,,,europe,capitals
The capital of Italy is {{}}.,Rome,Roma,Eternal city,europe,capitals
The capital of Spain is {{}}.,Madrid,,,europe,capitals
The capital of Japan is {{}}.,Tokyo,,Formerly Edo,asia,capitals
The capital of India is {{}}.,New Delhi,Delhi,,asia,capitals
The capital of Peru is {{}}.,Lima,,,americas,capitals
The capital of Chile is {{}}.,Santiago,,,americas,capitals
The capital of Canada is {{}}.,Ottawa,,,americas,capitals
The capital of Kenya is {{}}.,Nairobi,,,africa,capitals
"#;
