use crate::analysis::analyze;
use crate::config::Config;
use anyhow::{Context, Result};
use glob::glob;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rmp_serde::{decode, encode};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use timeseries::{Timeseries, synth};

pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    pub fn generate_series(&self) -> Result<()> {
        let series_idx = self
            .count_files("series-*.msgpack")
            .context("failed to count series files")?;

        let mut rng = match self.cfg.synth.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed.wrapping_add(series_idx as u64)),
            None => ChaCha12Rng::try_from_os_rng()?,
        };

        let series = synth::generate(&self.cfg.synth.params(), &mut rng)
            .context("failed to generate series")?;

        let file = self.series_file(series_idx);
        save_series(&series, &file).with_context(|| format!("failed to save {file:?}"))?;
        log::info!("wrote {file:?}");

        Ok(())
    }

    pub fn analyze_series(&self) -> Result<()> {
        let n_series = self
            .count_files("series-*.msgpack")
            .context("failed to count series files")?;

        for series_idx in 0..n_series {
            let series_file = self.series_file(series_idx);
            let series = load_series(&series_file)
                .with_context(|| format!("failed to load {series_file:?}"))?;

            let report = analyze(series, &self.cfg.analysis)
                .with_context(|| format!("failed to analyze {series_file:?}"))?;

            let report_file = self.report_file(series_idx);
            save_report(&report, &report_file)
                .with_context(|| format!("failed to save {report_file:?}"))?;

            let progress = 100.0 * (series_idx + 1) as f64 / n_series as f64;
            log::info!("completed {progress:06.2}%");
        }

        Ok(())
    }

    pub fn clean_reports(&self) -> Result<()> {
        for report_file in self.glob_files("report-*.json")? {
            fs::remove_file(&report_file)
                .with_context(|| format!("failed to remove {report_file:?}"))?;
            log::info!("removed {report_file:?}");
        }
        Ok(())
    }

    fn glob_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = self.data_dir.join(pattern);
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let files = glob(pattern)
            .context("failed to glob files")?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        Ok(files)
    }

    fn count_files(&self, pattern: &str) -> Result<usize> {
        Ok(self.glob_files(pattern)?.len())
    }

    fn series_file(&self, series_idx: usize) -> PathBuf {
        self.data_dir.join(format!("series-{series_idx:04}.msgpack"))
    }

    fn report_file(&self, series_idx: usize) -> PathBuf {
        self.data_dir.join(format!("report-{series_idx:04}.json"))
    }
}

fn save_series(series: &Timeseries, file: &Path) -> Result<()> {
    let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file);
    encode::write(&mut writer, series).context("failed to serialize series")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

fn save_report<T: Serialize>(report: &T, file: &Path) -> Result<()> {
    let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context("failed to serialize report")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

fn load_series(file: &Path) -> Result<Timeseries> {
    let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    let mut reader = BufReader::new(file);
    let series: Timeseries =
        decode::from_read(&mut reader).context("failed to deserialize series")?;
    series.len().context("inconsistent series")?;
    Ok(series)
}
