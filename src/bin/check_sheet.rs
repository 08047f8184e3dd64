use runreport::fetch::workbook::read_path;
use runreport::process::validate::{Column, GUIDANCE};
use runreport::process::validate;
use std::{env, path::Path, process::exit};

fn main() {
    // Expect exactly one CLI argument: path to an .xlsx or .csv sheet.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <SHEET.xlsx|SHEET.csv>", args[0]);
        exit(1);
    }
    if let Err(e) = check_sheet(Path::new(&args[1])) {
        eprintln!("{}", e);
        exit(1);
    }
}

/// Validate a local sheet and print what survived.
fn check_sheet(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_path(path)?;
    println!("=== Sheet: {} ===", path.display());
    println!("Columns found:        {}", raw.column_count());
    println!("Data rows:            {}", raw.rows.len());
    if raw.is_empty() {
        println!("The file is empty or has no records.");
        return Ok(());
    }

    match validate(&raw) {
        Ok(clean) => {
            println!("Rows kept:            {}", clean.len());
            println!("Rows dropped (<=0km): {}", raw.rows.len() - clean.len());
            let names: Vec<&str> = Column::ALL.iter().map(Column::name).collect();
            println!("Columns:              {}", names.join(", "));
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", GUIDANCE);
            Err(err.into())
        }
    }
}
