use {
    crate::{domain::TimeOfDay, models::Prediction, utils::format_hm},
    anyhow::{Context, Result},
    std::{
        fs::File,
        io::{BufWriter, Write},
        path::Path,
    },
};

/// `Time: HH:MM, Predicted Mean: 123.45, Std Dev: 6.78`
pub fn format_prediction_line(time: TimeOfDay, prediction: &Prediction) -> String {
    format!(
        "Time: {}, Predicted Mean: {:.2}, Std Dev: {:.2}",
        format_hm(time.secs()),
        prediction.mean_secs,
        prediction.std_dev_secs
    )
}

pub fn write_prediction_set<W: Write>(mut writer: W, set: &[(TimeOfDay, Prediction)]) -> Result<()> {
    for (time, prediction) in set {
        writeln!(writer, "{}", format_prediction_line(*time, prediction))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_prediction_set(path: &Path, set: &[(TimeOfDay, Prediction)]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create prediction set {}", path.display()))?;
    write_prediction_set(BufWriter::new(file), set)
        .with_context(|| format!("Failed to write prediction set {}", path.display()))?;
    log::info!("Wrote {} predictions to {}", set.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let time = TimeOfDay::from_hms(7, 5, 0).unwrap();
        assert_eq!(
            format_prediction_line(time, &Prediction::new(612.346, 81.6497)),
            "Time: 07:05, Predicted Mean: 612.35, Std Dev: 81.65"
        );
        assert_eq!(
            format_prediction_line(TimeOfDay::MIDNIGHT, &Prediction::NO_DATA),
            "Time: 00:00, Predicted Mean: 0.00, Std Dev: 0.00"
        );
    }

    #[test]
    fn test_write_set_in_order() {
        let set = vec![
            (TimeOfDay::MIDNIGHT, Prediction::new(100.0, 0.0)),
            (TimeOfDay::from_hms(0, 1, 0).unwrap(), Prediction::new(101.5, 2.25)),
        ];
        let mut out = Vec::new();
        write_prediction_set(&mut out, &set).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Time: 00:00, Predicted Mean: 100.00, Std Dev: 0.00\n\
             Time: 00:01, Predicted Mean: 101.50, Std Dev: 2.25\n"
        );
    }
}
