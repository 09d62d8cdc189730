// Render the recruit(1) man page
//
// Usage: generate-man [OUTPUT_DIR]   (defaults to the current directory)

use anyhow::{Context, Result};
use clap::CommandFactory;
use recruit::cli::Cli;
use std::path::PathBuf;

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd.clone());
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)?;

    let page = out_dir.join("recruit.1");
    std::fs::write(&page, buffer)
        .with_context(|| format!("Failed to write {}", page.display()))?;
    println!("Wrote {}", page.display());

    for sub in cmd.get_subcommands() {
        let name = format!("recruit-{}", sub.get_name());
        let man = clap_mangen::Man::new(sub.clone()).title(name.to_uppercase());
        let mut buffer: Vec<u8> = Vec::new();
        man.render(&mut buffer)?;
        let page = out_dir.join(format!("{}.1", name));
        std::fs::write(&page, buffer)
            .with_context(|| format!("Failed to write {}", page.display()))?;
        println!("Wrote {}", page.display());
    }
    Ok(())
}
