//! Formats command: list readers and writers.

use clap::Args;

use crate::error::Result;
use crate::format::FormatRegistry;

/// List available readers and writers
#[derive(Args, Debug)]
pub struct FormatsArgs {}

pub fn run(_args: FormatsArgs) -> Result<()> {
    print!("{}", listing(&FormatRegistry::with_defaults()));
    Ok(())
}

fn listing(registry: &FormatRegistry) -> String {
    let mut out = String::new();
    for (title, names) in [("Readers", registry.readers()), ("Writers", registry.writers())] {
        out.push_str(title);
        out.push_str(":\n");
        for name in names {
            let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
            out.push_str(&format!("  {:<16} {}\n", name, description));
        }
    }
    out
}
