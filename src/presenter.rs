//! Trait abstraction for the reading display, plus the terminal grid.
//!
//! A render replaces the whole previously displayed set; there is no
//! incremental update or diffing.

use crate::feed::reading::SensorReading;

/// Trait for rendering an ordered sequence of readings
pub trait Presenter: Send {
    /// Render the readings, replacing everything previously shown
    fn render(&mut self, readings: &[SensorReading]);
}

/// Renders readings as a fixed-column text grid on stdout
#[derive(Debug)]
pub struct GridPresenter {
    columns: usize,
}

impl GridPresenter {
    /// # Arguments
    ///
    /// * `columns` - Number of grid columns, at least 1
    pub fn new(columns: usize) -> Self {
        Self { columns: columns.max(1) }
    }

    /// Format one reading as a grid cell
    fn cell(reading: &SensorReading) -> String {
        let temperature = match reading.temperature {
            Some(t) => format!("{:.1}\u{b0}C", t),
            None => "--".to_string(),
        };
        let battery = match reading.battery {
            Some(b) => format!("{:.0}%", b),
            None => "--".to_string(),
        };
        format!("{}: {} (batt {})", reading.label, temperature, battery)
    }

    /// Lay out cells into rows of `columns`, padded to a common width
    fn layout(&self, readings: &[SensorReading]) -> Vec<String> {
        let cells: Vec<String> = readings.iter().map(Self::cell).collect();
        let width = cells.iter().map(String::len).max().unwrap_or(0);

        cells
            .chunks(self.columns)
            .map(|row| {
                row.iter()
                    .map(|cell| format!("{:<width$}", cell, width = width))
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            })
            .collect()
    }
}

impl Presenter for GridPresenter {
    fn render(&mut self, readings: &[SensorReading]) {
        if readings.is_empty() {
            println!("(no sensor readings)");
            return;
        }
        for row in self.layout(readings) {
            println!("{}", row);
        }
    }
}
