use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{Config, ScanConfig};
use crate::core::compare::{CompareError, NormDistances, compare_files};
use crate::core::dhash::{DHash, DHasher};
use crate::core::scanner::list_images;

/// Rolling state of an adjacent-pair walk: nothing seen yet, or the most
/// recent element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window<T> {
    Empty,
    Holding(T),
}

impl<T: Clone> Window<T> {
    /// Advance to `current`, yielding the pair it forms with the previous
    /// element if there is one.
    pub fn push(self, current: T) -> (Window<T>, Option<(T, T)>) {
        let pair = match self {
            Window::Empty => None,
            Window::Holding(previous) => Some((previous, current.clone())),
        };
        (Window::Holding(current), pair)
    }
}

impl<T> Default for Window<T> {
    fn default() -> Self {
        Window::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum Distance {
    Norm(NormDistances),
    Hamming { bits: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairOutcome {
    pub previous: PathBuf,
    pub current: PathBuf,
    pub distance: Distance,
    pub similar: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub directory: PathBuf,
    /// Files that took part in the pass, in comparison order.
    pub files: Vec<PathBuf>,
    pub outcomes: Vec<PairOutcome>,
}

impl PassReport {
    pub fn matches(&self) -> impl Iterator<Item = &PairOutcome> {
        self.outcomes.iter().filter(|o| o.similar)
    }
}

/// Compare every adjacent pair of files with pixel-difference norms.
///
/// Pairs whose samples cannot be compared get the configured failure
/// distances. A file that cannot be opened or decoded aborts the pass.
pub fn run_norm_pass(dir: &Path, config: &Config) -> Result<PassReport> {
    let files = list_images(dir, &config.scan)?;
    let norm = &config.norm;

    if let Some(out) = &norm.intermediates {
        std::fs::create_dir_all(out)
            .with_context(|| format!("Failed to create directory {:?}", out))?;
    }

    let bar = progress_bar(files.len().saturating_sub(1) as u64, "comparing")?;
    let start = Instant::now();

    let mut outcomes = Vec::new();
    let mut window = Window::Empty;
    for file in &files {
        let (next, pair) = window.push(file);
        window = next;

        let Some((previous, current)) = pair else {
            continue;
        };

        bar.set_message(display_name(current));
        let distances = match compare_files(previous, current, norm) {
            Ok(distances) => distances,
            Err(CompareError::Load(e)) => {
                return Err(e).with_context(|| {
                    format!("Failed to compare {:?} and {:?}", previous, current)
                });
            }
            Err(e) => {
                log::debug!(
                    "Comparison of {} and {} failed: {}",
                    previous.display(),
                    current.display(),
                    e
                );
                norm.failure_distances
            }
        };
        bar.inc(1);

        outcomes.push(PairOutcome {
            previous: previous.clone(),
            current: current.clone(),
            distance: Distance::Norm(distances),
            similar: distances.manhattan < norm.threshold,
        });
    }

    bar.finish_and_clear();
    log::info!(
        "Compared {} pair(s) in {:.2?}",
        outcomes.len(),
        start.elapsed()
    );

    Ok(PassReport {
        directory: dir.to_path_buf(),
        files,
        outcomes,
    })
}

/// Hash the first files of the sorted listing, then compare adjacent hashes.
pub fn run_hash_pass(dir: &Path, config: &Config) -> Result<PassReport> {
    let scan = ScanConfig {
        sorted: true,
        ..config.scan.clone()
    };
    let mut files = list_images(dir, &scan)?;
    if files.len() > config.hash.limit {
        log::info!(
            "Hashing the first {} of {} files",
            config.hash.limit,
            files.len()
        );
        files.truncate(config.hash.limit);
    }

    let hasher = DHasher::new(config.hash.hash_size);
    let bar = progress_bar(files.len() as u64, "hashing")?;
    let start = Instant::now();

    let mut hashes = Vec::with_capacity(files.len());
    for path in &files {
        bar.set_message(display_name(path));
        let hash = hasher
            .hash_file(path)
            .with_context(|| format!("Failed to hash {:?}", path))?;
        log::info!("Hashed {}", path.display());
        log::debug!("{} {}", path.display(), hash);
        hashes.push(hash);
        bar.inc(1);
    }
    bar.finish_and_clear();
    log::info!("Hashed {} image(s) in {:.2?}", hashes.len(), start.elapsed());
    log::info!("Comparing adjacent hashes");

    let mut outcomes = Vec::new();
    let mut window: Window<(&PathBuf, &DHash)> = Window::Empty;
    for entry in files.iter().zip(&hashes) {
        let (next, pair) = window.push(entry);
        window = next;

        if let Some(((prev_path, prev_hash), (curr_path, curr_hash))) = pair {
            let bits = curr_hash.distance(prev_hash);
            outcomes.push(PairOutcome {
                previous: prev_path.clone(),
                current: curr_path.clone(),
                distance: Distance::Hamming { bits },
                similar: bits < config.hash.threshold,
            });
        }
    }

    Ok(PassReport {
        directory: dir.to_path_buf(),
        files,
        outcomes,
    })
}

fn progress_bar(len: u64, verb: &str) -> Result<ProgressBar> {
    let bar = ProgressBar::new(len);
    bar.set_style(ProgressStyle::with_template(&format!(
        "{{spinner:.green}} {} [{{bar:30}}] {{pos}}/{{len}} {{msg}}",
        verb
    ))?);
    Ok(bar)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_yields_adjacent_pairs() {
        let mut window = Window::default();
        let mut pairs = Vec::new();
        for n in 1..=4 {
            let (next, pair) = window.push(n);
            window = next;
            pairs.extend(pair);
        }

        assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 4)]);
        assert_eq!(window, Window::Holding(4));
    }

    #[test]
    fn test_window_single_element() {
        let (window, pair) = Window::Empty.push("only");
        assert_eq!(pair, None);
        assert_eq!(window, Window::Holding("only"));
    }

    #[test]
    fn test_report_matches_filters_similar() {
        let outcome = |similar| PairOutcome {
            previous: PathBuf::from("a.JPG"),
            current: PathBuf::from("b.JPG"),
            distance: Distance::Hamming { bits: 3 },
            similar,
        };
        let report = PassReport {
            directory: PathBuf::from("."),
            files: vec![],
            outcomes: vec![outcome(true), outcome(false), outcome(true)],
        };

        assert_eq!(report.matches().count(), 2);
    }
}
