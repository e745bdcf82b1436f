use std::io::{self, Write};

use hexinfo::{ScanSummary, StartAddress};

/// Render the scan summary in the fixed report layout.
pub fn print<W: Write>(out: &mut W, label: &str, summary: &ScanSummary) -> io::Result<()> {
    writeln!(out, "HEX file: {label}")?;

    if !summary.eof_seen {
        writeln!(out, "Missing EOF record")?;
    }
    match summary.start_address {
        StartAddress::None => {}
        StartAddress::Single(addr) => writeln!(out, "Start address: 0x{addr:X}")?,
        StartAddress::Multiple => writeln!(out, "Multiple start addresses found")?,
    }

    writeln!(
        out,
        "{} data records, max size {}",
        summary.data_records, summary.max_data_size
    )?;

    write!(out, "{} data segments", summary.chunks.len())?;
    if summary.overlaps > 0 {
        write!(out, ", {} overlaps found", summary.overlaps)?;
    }
    writeln!(out, ":")?;
    for chunk in &summary.chunks {
        writeln!(out, "start 0x{:X} size 0x{:X}", chunk.address, chunk.size)?;
    }
    Ok(())
}
