//! `tooldex check`: catalog ingestion report.

use anyhow::Result;

use crate::catalog::Catalog;

/// Print what ingestion accepted and refused. Returns `false` if any record
/// was rejected so the caller can exit non-zero.
pub fn run_check(catalog: &Catalog) -> Result<bool> {
    println!("catalog:   {}", catalog.source);
    println!("sha256:    {}", catalog.digest);
    println!("accepted:  {}", catalog.tools.len());
    println!("rejected:  {}", catalog.rejected.len());

    if !catalog.rejected.is_empty() {
        println!();
        println!("{:<7} {:<28} REASON", "RECORD", "SLUG");
        for r in &catalog.rejected {
            println!("{:<7} {:<28} {}", r.index, r.slug, r.reason);
        }
    }

    if !catalog.undated.is_empty() {
        println!();
        println!(
            "warning: {} tool(s) with unparseable dateAdded (sorted as oldest): {}",
            catalog.undated.len(),
            catalog.undated.join(", ")
        );
    }

    let ok = catalog.rejected.is_empty();
    println!();
    println!("{}", if ok { "ok" } else { "FAILED" });
    Ok(ok)
}
