use std::io::Write;

use crate::error::Result;
use crate::experiment::ResultRecord;

pub trait Reporter {
    fn report(&mut self, record: &ResultRecord) -> Result<()>;

    fn report_all(&mut self, records: &[ResultRecord]) -> Result<()> {
        for record in records {
            self.report(record)?;
        }
        Ok(())
    }
}

/// Plain-text rendering, one block per arrival rate.
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, record: &ResultRecord) -> Result<()> {
        writeln!(self.out, "Simulating for λ = {} frames/sec", record.arrival_rate)?;
        for station in &record.stations {
            writeln!(
                self.out,
                "Station {} - Throughput: {:.2} KBps, Collisions: {}, Frames Transmitted: {}",
                station.station + 1,
                station.throughput_kb,
                station.collisions,
                station.frames_transmitted
            )?;
        }
        writeln!(self.out, "Fairness Index: {}", record.fairness)?;
        writeln!(self.out, "---------------------------------")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{FairnessIndex, StationResult};

    fn record(fairness: FairnessIndex) -> ResultRecord {
        ResultRecord {
            arrival_rate: 300,
            stations: vec![
                StationResult {
                    station: 0,
                    throughput_kb: 1234.5,
                    collisions: 17,
                    frames_transmitted: 823,
                },
                StationResult {
                    station: 1,
                    throughput_kb: 1200.0,
                    collisions: 20,
                    frames_transmitted: 800,
                },
            ],
            fairness,
        }
    }

    fn render(records: &[ResultRecord]) -> String {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.report_all(records).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn renders_station_lines_and_fairness() {
        let text = render(&[record(FairnessIndex::Ratio(823.0 / 800.0))]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Simulating for λ = 300 frames/sec");
        assert_eq!(
            lines[1],
            "Station 1 - Throughput: 1234.50 KBps, Collisions: 17, Frames Transmitted: 823"
        );
        assert_eq!(
            lines[2],
            "Station 2 - Throughput: 1200.00 KBps, Collisions: 20, Frames Transmitted: 800"
        );
        assert_eq!(lines[3], "Fairness Index: 1.03");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn renders_undefined_fairness() {
        let text = render(&[record(FairnessIndex::Undefined)]);
        assert!(text.contains("Fairness Index: undefined\n"));
    }

    #[test]
    fn one_block_per_record() {
        let text = render(&[record(FairnessIndex::Jain(1.0)), record(FairnessIndex::Jain(0.5))]);
        assert_eq!(text.matches("Simulating for").count(), 2);
        assert!(text.contains("Fairness Index: 1.00"));
        assert!(text.contains("Fairness Index: 0.50"));
    }
}
