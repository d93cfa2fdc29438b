use crate::{
    data::{csv::Dataset, encoding::argmax},
    error::NnError,
    network::network::Network,
};

/// Mean cost and classification accuracy over a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub mean_cost: f64,
    /// Fraction in [0, 1] of samples whose output argmax matches the label.
    pub accuracy: f64,
}

/// Trains on a single example: set input, forward, back-propagate.
///
/// Returns the cost measured before the weight update.
pub fn train_step(
    network: &mut Network,
    input: &[f64],
    target: &[f64],
    learning_rate: f64,
) -> Result<f64, NnError> {
    network.set_input(input)?;
    network.forward_prop()?;
    let cost = network.cost(target)?;
    network.back_prop(target, learning_rate)?;
    Ok(cost)
}

/// Forward-only pass over `dataset`. Weights are not touched.
pub fn evaluate(network: &mut Network, dataset: &Dataset) -> Result<Evaluation, NnError> {
    if dataset.is_empty() {
        return Ok(Evaluation { mean_cost: 0.0, accuracy: 0.0 });
    }

    let mut total_cost = 0.0;
    let mut correct = 0usize;
    for (input, target) in dataset.inputs.iter().zip(&dataset.targets) {
        network.set_input(input)?;
        network.forward_prop()?;
        total_cost += network.cost(target)?;
        if let (Some(p), Some(t)) = (argmax(network.output()?), argmax(target)) {
            if p == t {
                correct += 1;
            }
        }
    }

    let n = dataset.len() as f64;
    Ok(Evaluation {
        mean_cost: total_cost / n,
        accuracy: correct as f64 / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv::parse_csv;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn train_step_returns_pre_update_cost() {
        let mut net = Network::new(&[2, 1]);
        let cost = train_step(&mut net, &[1.0, 0.0], &[1.0], 0.5).unwrap();
        assert_eq!(cost, 0.125);
        net.forward_prop().unwrap();
        assert!(net.cost(&[1.0]).unwrap() < cost);
    }

    #[test]
    fn train_step_rejects_wrong_target_without_touching_weights() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut net = Network::new(&[2, 3, 2]);
        net.init_weights_random(&mut rng);
        let before: Vec<_> = net.layers().iter().map(|l| l.weights().clone()).collect();
        assert_eq!(
            train_step(&mut net, &[0.5, 0.5], &[1.0], 0.5),
            Err(NnError::DimensionMismatch { expected: 2, actual: 1 })
        );
        let after: Vec<_> = net.layers().iter().map(|l| l.weights().clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn evaluate_counts_argmax_hits() {
        let ds = parse_csv("0,1,0\n1,0,1\n", 2).unwrap();
        let mut net = Network::new(&[2, 2]);
        let eval = evaluate(&mut net, &ds).unwrap();
        // all-zero weights give [0.5, 0.5], so argmax is always class 0
        assert_eq!(eval.accuracy, 0.5);
        assert_eq!(eval.mean_cost, 0.25);
    }
}
