//! Command-line trainer: fits a network to labeled CSV data with per-example SGD.
//!
//! ```text
//! ferrite-mlp --train mnist_train.csv --test mnist_test.csv \
//!     --topology 784,32,16,10 --target-accuracy 0.95
//! ```
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use ferrite_mlp::{
    data::csv::read_csv,
    train::{evaluate, train_loop, TrainConfig},
    Network,
};

#[derive(Parser, Debug)]
#[command(name = "ferrite-mlp", version, about = "Train a sigmoid MLP on labeled CSV data")]
struct Args {
    /// Training CSV; each row is `label,feature_0,...`
    #[arg(long)]
    train: PathBuf,

    /// Held-out CSV used for accuracy reports and early stopping
    #[arg(long)]
    test: Option<PathBuf>,

    /// Layer widths, input first (the last width is the number of classes)
    #[arg(long, value_delimiter = ',', default_value = "784,32,16,10")]
    topology: Vec<usize>,

    /// JSON file with training hyperparameters
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    epochs: Option<usize>,

    /// Stop once test accuracy reaches this fraction (e.g. 0.95)
    #[arg(long)]
    target_accuracy: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Every feature is divided by this value after loading
    #[arg(long, default_value_t = 255.0)]
    scale: f64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    if args.topology.len() < 2 || args.topology.contains(&0) {
        bail!("topology needs at least two non-zero widths, got {:?}", args.topology);
    }

    let mut config = match &args.config {
        Some(path) => TrainConfig::load_json(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => TrainConfig::default(),
    };
    if let Some(lr) = args.learning_rate {
        config.learning_rate = lr;
    }
    if let Some(epochs) = args.epochs {
        config.max_epochs = epochs;
    }
    if args.target_accuracy.is_some() {
        config.target_accuracy = args.target_accuracy;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let n_classes = args.topology[args.topology.len() - 1];
    let input_width = args.topology[0];

    info!("parsing {}", args.train.display());
    let mut train = read_csv(&args.train, n_classes)
        .with_context(|| format!("loading {}", args.train.display()))?;
    train.normalize(args.scale);
    if train.feature_width() != input_width {
        bail!(
            "{} has {} features per row but the network expects {}",
            args.train.display(),
            train.feature_width(),
            input_width
        );
    }

    let test = match &args.test {
        Some(path) => {
            info!("parsing {}", path.display());
            let mut ds = read_csv(path, n_classes)
                .with_context(|| format!("loading {}", path.display()))?;
            ds.normalize(args.scale);
            if ds.feature_width() != input_width {
                bail!("{} has {} features per row", path.display(), ds.feature_width());
            }
            Some(ds)
        }
        None => None,
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut network = Network::new(&args.topology);
    network.init_weights_random(&mut rng);

    info!(
        "training {:?} on {} samples, learning rate {}",
        network.topology(),
        train.len(),
        config.learning_rate
    );
    let report = train_loop(&mut network, &train, test.as_ref(), &config, &mut rng)?;
    info!("finished after {} epochs", report.epochs.len());

    let (name, eval) = match &test {
        Some(ds) => ("test", evaluate(&mut network, ds)?),
        None => ("train", evaluate(&mut network, &train)?),
    };
    println!(
        "{name} accuracy: {:.2}% (mean cost {:.6})",
        eval.accuracy * 100.0,
        eval.mean_cost
    );
    Ok(())
}
