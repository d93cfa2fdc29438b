use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::csv::Dataset;
use crate::error::TrainError;
use crate::network::network::Network;
use crate::train::epoch_stats::{EpochStats, TrainReport};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{evaluate, train_step};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` with per-example SGD for up to `config.max_epochs` epochs.
///
/// Each epoch visits every training sample once in an order shuffled by
/// `rng`. Every `config.report_every` samples the current cost (and test
/// accuracy, when `test` is given) is logged; if that accuracy reaches
/// `config.target_accuracy` the run stops right there.
///
/// # Early termination
/// Besides the accuracy target, the loop stops when:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true` (checked per epoch and per report).
///
/// The network is borrowed mutably for the whole run; nothing else can
/// touch it until the loop returns.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    train: &Dataset,
    test: Option<&Dataset>,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainReport, TrainError> {
    if train.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let mut report = TrainReport::default();
    let mut indices: Vec<usize> = (0..train.len()).collect();

    for epoch in 1..=config.max_epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        indices.shuffle(rng);

        let mut total_cost = 0.0;
        let mut seen = 0usize;
        let mut halted = false;

        for &idx in &indices {
            let cost = train_step(
                network,
                &train.inputs[idx],
                &train.targets[idx],
                config.learning_rate,
            )?;
            total_cost += cost;
            seen += 1;

            if config.report_every > 0 && seen % config.report_every == 0 {
                let accuracy = match test {
                    Some(t) => Some(evaluate(network, t)?.accuracy),
                    None => None,
                };
                let iteration = (epoch - 1) * train.len() + seen;
                match accuracy {
                    Some(acc) => info!(
                        "iteration {iteration}: cost {cost:.6}, test accuracy {:.2}%",
                        acc * 100.0
                    ),
                    None => info!("iteration {iteration}: cost {cost:.6}"),
                }

                if reached(config, accuracy) {
                    report.reached_target = true;
                    halted = true;
                    break;
                }
                if stop_requested(config) {
                    halted = true;
                    break;
                }
            }
        }

        let (test_cost, test_accuracy) = match test {
            Some(t) => {
                let eval = evaluate(network, t)?;
                (Some(eval.mean_cost), Some(eval.accuracy))
            }
            None => (None, None),
        };
        if reached(config, test_accuracy) {
            report.reached_target = true;
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.max_epochs,
            train_cost: total_cost / seen.max(1) as f64,
            test_cost,
            test_accuracy,
            samples_seen: seen,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {}/{}: mean cost {:.6}{}",
            stats.epoch,
            stats.total_epochs,
            stats.train_cost,
            stats
                .test_accuracy
                .map(|a| format!(", test accuracy {:.2}%", a * 100.0))
                .unwrap_or_default()
        );
        report.epochs.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }

        if halted || report.reached_target {
            break;
        }
    }

    if let Some(target) = config.target_accuracy {
        if !report.reached_target {
            warn!("training ended without reaching target accuracy {:.2}%", target * 100.0);
        }
    }
    Ok(report)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}

fn reached(config: &TrainConfig, accuracy: Option<f64>) -> bool {
    matches!((config.target_accuracy, accuracy), (Some(target), Some(acc)) if acc >= target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv::parse_csv;
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::{atomic::AtomicBool, mpsc, Arc};

    fn toy() -> Dataset {
        parse_csv("0,1,0\n1,0,1\n0,0.9,0.1\n1,0.1,0.9\n", 2).unwrap()
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let mut net = Network::new(&[2, 2]);
        let mut rng = StdRng::seed_from_u64(0);
        let err = train_loop(&mut net, &Dataset::default(), None, &TrainConfig::default(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, TrainError::EmptyDataset));
    }

    #[test]
    fn runs_every_epoch_and_streams_stats() {
        let data = toy();
        let mut net = Network::new(&[2, 2]);
        let mut rng = StdRng::seed_from_u64(5);
        net.init_weights_random(&mut rng);

        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(0.5, 4);
        config.progress_tx = Some(tx);

        let report = train_loop(&mut net, &data, Some(&data), &config, &mut rng).unwrap();
        drop(config);

        let streamed: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(report.epochs.len(), 4);
        assert_eq!(streamed, report.epochs);
        assert!(report.epochs.iter().all(|s| s.samples_seen == 4));
        assert_eq!(report.last().unwrap().epoch, 4);
        assert!(!report.reached_target);
    }

    #[test]
    fn stops_once_target_accuracy_is_reached() {
        let data = toy();
        let mut net = Network::new(&[2, 2]);
        let mut rng = StdRng::seed_from_u64(5);
        net.init_weights_random(&mut rng);

        let mut config = TrainConfig::new(0.5, 50);
        config.target_accuracy = Some(0.0);
        config.report_every = 1;

        let report = train_loop(&mut net, &data, Some(&data), &config, &mut rng).unwrap();
        assert!(report.reached_target);
        assert_eq!(report.epochs.len(), 1);
        assert_eq!(report.epochs[0].samples_seen, 1);
    }

    #[test]
    fn stop_flag_prevents_any_epoch() {
        let data = toy();
        let mut net = Network::new(&[2, 2]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut config = TrainConfig::new(0.5, 10);
        config.stop_flag = Some(Arc::new(AtomicBool::new(true)));

        let report = train_loop(&mut net, &data, None, &config, &mut rng).unwrap();
        assert!(report.epochs.is_empty());
    }
}
