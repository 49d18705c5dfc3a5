use std::{future::Future, io::Write, time::Instant};

use color_eyre::eyre::{Report, Result};
use log::*;
use tokio::{select, time::sleep};

use crate::{
    config::Settings,
    metrics::{Counters, HostMetrics, Sample},
    sensors::SensorReader,
    ui::{self, Frame},
};

/// How the dashboard stopped.
#[derive(Debug)]
pub enum Exit {
    Interrupted,
    Failed(Report),
}

/// While running, the only thing carried between iterations is the previous
/// sample's network counters.
#[derive(Debug)]
pub enum LoopState {
    Running(Counters),
    Terminated(Exit),
}

#[derive(Debug)]
pub struct App<M> {
    settings: Settings,
    sensors: SensorReader,
    metrics: M,
}

impl<M: HostMetrics> App<M> {
    pub fn new(settings: Settings, metrics: M) -> Result<Self> {
        let sensors = SensorReader::new(&settings.sensors)?;
        Ok(Self {
            settings,
            sensors,
            metrics,
        })
    }

    /// Counters to compute the first rates against.
    pub fn seed(&mut self) -> Result<Counters> {
        Ok(self.metrics.read()?.counters)
    }

    /// Sensors first, then the OS counters. Only the latter can fail.
    pub async fn sample(&mut self) -> Result<Sample> {
        let sensors = self.sensors.sample().await;
        let host = self.metrics.read()?;
        Ok(Sample::new(Instant::now(), sensors, host))
    }

    /// Lay out `sample`, returning the frame and the counters to carry into
    /// the next iteration.
    pub fn compose(&self, previous: Counters, sample: &Sample) -> (Frame, Counters) {
        let rates = sample.counters.delta(&previous);
        let frame = Frame::new(sample, rates, &self.settings.display);
        (frame, sample.counters)
    }

    async fn iterate<W: Write>(&mut self, out: &mut W, previous: Counters) -> Result<Counters> {
        let sample = self.sample().await?;
        let (frame, next) = self.compose(previous, &sample);
        ui::draw(out, &frame)?;
        trace!(target: "App", "Drew sample taken {:?} ago", sample.timestamp.elapsed());
        tui_logger::move_events();
        sleep(self.settings.interval()).await;
        Ok(next)
    }

    /// Run the application's main loop until `shutdown` resolves or an
    /// iteration fails.
    ///
    /// A frame is written within a single poll, so shutdown never lands in
    /// the middle of one.
    pub async fn run<W, F>(&mut self, out: &mut W, shutdown: F) -> Result<()>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut state = match self.seed() {
            Ok(counters) => LoopState::Running(counters),
            Err(err) => LoopState::Terminated(Exit::Failed(err)),
        };
        info!(target: "App", "Refreshing every {:?}", self.settings.interval());
        loop {
            state = match state {
                LoopState::Running(previous) => select! {
                    biased;
                    _ = &mut shutdown => LoopState::Terminated(Exit::Interrupted),
                    result = self.iterate(out, previous) => match result {
                        Ok(next) => LoopState::Running(next),
                        Err(err) => LoopState::Terminated(Exit::Failed(err)),
                    },
                },
                LoopState::Terminated(Exit::Interrupted) => {
                    info!(target: "App", "Interrupted");
                    ui::exit_notice(out)?;
                    return Ok(());
                }
                LoopState::Terminated(Exit::Failed(err)) => {
                    error!(target: "App", "{}", err);
                    return Err(err);
                }
            };
        }
    }

    /// Print a single frame, one interval after the baseline.
    pub async fn once<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let previous = self.seed()?;
        sleep(self.settings.interval()).await;
        let sample = self.sample().await?;
        let (frame, _) = self.compose(previous, &sample);
        ui::print(out, &frame)?;
        Ok(())
    }
}
