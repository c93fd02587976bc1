use {
    crate::{
        config::DetectionSettings,
        domain::{RecordOutcome, Traversal, TraversalLog},
    },
    anyhow::{Context, Result},
    std::{
        fs::File,
        io::{BufRead, BufReader, BufWriter, Write},
        path::Path,
    },
};

/// One `segmentId,durationSeconds,YYYY-MM-DD,HH:MM:SS` line per traversal.
pub fn write_traversals<W: Write>(mut writer: W, traversals: &[Traversal]) -> Result<()> {
    for traversal in traversals {
        writeln!(writer, "{}", traversal.to_log_line())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_traversals(path: &Path, traversals: &[Traversal]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create traversal log {}", path.display()))?;
    write_traversals(BufWriter::new(file), traversals)
        .with_context(|| format!("Failed to write traversal log {}", path.display()))?;
    log::info!("Saved {} traversals to {}", traversals.len(), path.display());
    Ok(())
}

/// Reads a traversal log. Malformed lines (including non UTF-8 ones) and durations outside
/// the detection bounds are skipped with a warning. Reading stops once the log is full.
pub fn read_traversals<R: BufRead>(reader: R, settings: &DetectionSettings) -> Result<TraversalLog> {
    let mut log = TraversalLog::with_capacity(settings.traversal_capacity);
    let mut skipped = 0usize;

    for (line_no, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.context("Failed to read traversal log")?;
        let line = String::from_utf8_lossy(&raw);
        if line.trim().is_empty() {
            continue;
        }

        let traversal: Traversal = match line.parse() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Skipping traversal log line {} ({}): {}", line_no + 1, e, line.trim());
                skipped += 1;
                continue;
            }
        };

        if !settings.accepts_duration(traversal.duration_secs as i64) {
            log::warn!(
                "Skipping traversal log line {}: {}s outside [{}, {}]",
                line_no + 1,
                traversal.duration_secs,
                settings.min_duration_secs,
                settings.max_duration_secs
            );
            skipped += 1;
            continue;
        }

        if log.try_record(traversal) == RecordOutcome::AtCapacity {
            log::warn!(
                "Traversal log capacity ({}) reached at line {}; remaining entries ignored",
                settings.traversal_capacity,
                line_no + 1
            );
            break;
        }
    }

    if skipped > 0 {
        log::warn!("{} traversal log lines skipped", skipped);
    }

    Ok(log)
}

pub fn load_traversals(path: &Path, settings: &DetectionSettings) -> Result<TraversalLog> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open traversal log {}", path.display()))?;
    let log = read_traversals(BufReader::new(file), settings)?;
    log::info!("Loaded {} traversals from {}", log.len(), path.display());
    Ok(log)
}
