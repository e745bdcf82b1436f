use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::ExitCode;

use hexinfo::ScanSummary;

mod report;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let prog = prog_name(args.first().map(String::as_str));

    match args.len() {
        1 => run(&prog, None),
        2 => run(&prog, Some(Path::new(&args[1]))),
        _ => {
            eprintln!("Usage: {prog} [input-file]");
            ExitCode::from(1)
        }
    }
}

fn run(prog: &str, path: Option<&Path>) -> ExitCode {
    let label = match path {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    };

    match scan_input(path) {
        Ok(summary) => {
            if let Err(e) = report::print(&mut std::io::stdout(), &label, &summary) {
                eprintln!("{prog}: error: {e}");
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{prog}: error: {label}: {e}");
            ExitCode::from(2)
        }
    }
}

fn scan_input(path: Option<&Path>) -> Result<ScanSummary, hexinfo::Error> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            Ok(hexinfo::scan(BufReader::new(file))?)
        }
        None => Ok(hexinfo::scan(std::io::stdin().lock())?),
    }
}

fn prog_name(argv0: Option<&str>) -> String {
    argv0
        .map(Path::new)
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("hexinfo")
        .to_string()
}
