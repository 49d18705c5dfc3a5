use std::fmt::Display;

use crate::{
    config::DisplaySettings,
    metrics::{Rates, Sample},
    ui::bar::{bar_graph, format_speed},
};

pub const HEADER: &str = "--- Shell Stats ---";
pub const FOOTER: &str = "Press Ctrl+C to exit.";

/// One screenful of text, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    /// Lay out a sample.
    ///
    /// ```"not rust"
    /// --- Shell Stats ---
    /// CPU Temp:  [#########───────────] 45.60°C
    /// GPU Temp:  [ N/A ]°C
    /// GPU Fan:   [ N/A ] RPM
    /// RAM Usage: [######──────────────] 31.40%
    /// Upload:    1.21 KB/s
    /// Download:  3.50 MB/s
    ///
    /// Press Ctrl+C to exit.
    /// ```
    pub fn new(sample: &Sample, rates: Rates, display: &DisplaySettings) -> Self {
        let bar = |value: Option<f64>, max: f64| bar_graph(value, max, display.bar_length);
        let speed = |rate: Option<u64>| {
            rate.map(format_speed)
                .unwrap_or_else(|| "N/A".to_string())
        };
        let lines = vec![
            HEADER.to_string(),
            format!("CPU Temp:  {}°C", bar(sample.cpu_temp, display.cpu_temp_max)),
            format!("GPU Temp:  {}°C", bar(sample.gpu_temp, display.gpu_temp_max)),
            format!(
                "GPU Fan:   {} RPM",
                bar(sample.gpu_fan.map(f64::from), display.gpu_fan_max)
            ),
            format!("RAM Usage: {}%", bar(Some(sample.ram_percent), display.ram_max)),
            format!("Upload:    {}", speed(rates.upload)),
            format!("Download:  {}", speed(rates.download)),
            String::new(),
            FOOTER.to_string(),
        ];
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}
