use log::debug;
use rand::Rng;

use crate::{error::NnError, layers::dense::Layer, math::functions::cost};

/// A stack of dense sigmoid layers plus the input buffer they read from.
///
/// The network owns its input: `set_input` copies, and `output` hands out a
/// borrow that ends before the next mutation. There is no internal locking;
/// share across threads with `Arc<Mutex<Network>>` and lock around each call.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    input: Vec<f64>,
}

impl Network {
    /// Builds a network from layer widths, input width first.
    ///
    /// `[784, 32, 16, 10]` gives three layers. Fewer than two widths give a
    /// network with no layers, which reports `EmptyNetwork` on every query.
    /// All weights start at zero until `init_weights_random`.
    pub fn new(topology: &[usize]) -> Network {
        let layers = topology
            .windows(2)
            .map(|pair| Layer::new(pair[0], pair[1]))
            .collect();
        let input_size = topology.first().copied().unwrap_or(0);
        debug!("network created with topology {topology:?}");
        Network {
            layers,
            input: vec![0.0; input_size],
        }
    }

    /// Builds a network from pre-made layers, checking that they chain.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network, NnError> {
        for pair in layers.windows(2) {
            NnError::check_len(pair[1].input_size(), pair[0].output_size())?;
        }
        let input_size = layers.first().map_or(0, Layer::input_size);
        Ok(Network {
            layers,
            input: vec![0.0; input_size],
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Layer widths, input width first.
    pub fn topology(&self) -> Vec<usize> {
        std::iter::once(self.input.len())
            .chain(self.layers.iter().map(Layer::output_size))
            .collect()
    }

    /// Redraws every weight of every layer from U[0, 1), first layer first.
    pub fn init_weights_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in &mut self.layers {
            layer.init_weights(rng);
        }
        debug!("weights initialized for {} layers", self.layers.len());
    }

    /// Copies `input` into the network's own buffer.
    pub fn set_input(&mut self, input: &[f64]) -> Result<(), NnError> {
        NnError::check_len(self.input.len(), input.len())?;
        self.input.copy_from_slice(input);
        Ok(())
    }

    /// Runs the stored input through every layer in order.
    ///
    /// Stops at the first failing layer; layers after it keep their previous
    /// outputs.
    pub fn forward_prop(&mut self) -> Result<(), NnError> {
        let (first, rest) = self.layers.split_first_mut().ok_or(NnError::EmptyNetwork)?;
        first.forward(&self.input)?;
        let mut prev = first;
        for layer in rest {
            layer.forward(prev.output())?;
            prev = layer;
        }
        Ok(())
    }

    /// Output of the last layer as of the most recent `forward_prop`.
    pub fn output(&self) -> Result<&[f64], NnError> {
        self.layers
            .last()
            .map(Layer::output)
            .ok_or(NnError::EmptyNetwork)
    }

    /// Halved sum of squared errors between the current output and `target`.
    pub fn cost(&self, target: &[f64]) -> Result<f64, NnError> {
        cost(self.output()?, target)
    }

    /// One stochastic gradient descent step towards `target` for the example
    /// last passed through `forward_prop`.
    ///
    /// Walks the layers from last to first. Each layer updates its weights
    /// and hands back the error signal for the layer below, computed from
    /// its pre-update weights. The input buffer and cached outputs are not
    /// modified.
    pub fn back_prop(&mut self, target: &[f64], learning_rate: f64) -> Result<(), NnError> {
        let output = self.output()?;
        NnError::check_len(output.len(), target.len())?;

        // ∂cost/∂output for the halved sum of squares
        let mut delta: Vec<f64> = output.iter().zip(target).map(|(o, t)| o - t).collect();

        for i in (0..self.layers.len()).rev() {
            let (below, rest) = self.layers.split_at_mut(i);
            let prev_activation = match below.last() {
                Some(prev) => prev.output(),
                None => self.input.as_slice(),
            };
            delta = rest[0].backward(&delta, prev_activation, learning_rate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn construct_allocates_chained_layers() {
        let net = Network::new(&[4, 3, 2]);
        assert_eq!(net.layers().len(), 2);
        assert_eq!(net.input(), &[0.0; 4]);
        assert_eq!(net.layers()[0].input_size(), 4);
        assert_eq!(net.layers()[0].output_size(), 3);
        assert_eq!(net.layers()[1].input_size(), 3);
        assert_eq!(net.topology(), vec![4, 3, 2]);
    }

    #[test]
    fn zero_layer_network_reports_empty() {
        let mut net = Network::new(&[3]);
        assert_eq!(net.output(), Err(NnError::EmptyNetwork));
        assert_eq!(net.forward_prop(), Err(NnError::EmptyNetwork));
        assert_eq!(net.back_prop(&[], 0.1), Err(NnError::EmptyNetwork));
        assert_eq!(net.cost(&[]), Err(NnError::EmptyNetwork));
    }

    #[test]
    fn set_input_copies_caller_buffer() {
        let mut net = Network::new(&[3, 1]);
        let mut buf = vec![0.1, 0.2, 0.3];
        net.set_input(&buf).unwrap();
        buf[0] = 9.0;
        assert_eq!(net.input(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn set_input_mismatch_leaves_input_untouched() {
        let mut net = Network::new(&[3, 1]);
        net.set_input(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(
            net.set_input(&[1.0, 1.0]),
            Err(NnError::DimensionMismatch { expected: 3, actual: 2 })
        );
        assert_eq!(net.input(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn forward_output_has_last_layer_width() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut net = Network::new(&[5, 7, 3]);
        net.init_weights_random(&mut rng);
        net.set_input(&[0.2, 0.4, 0.6, 0.8, 1.0]).unwrap();
        net.forward_prop().unwrap();
        assert_eq!(net.output().unwrap().len(), 3);
    }

    #[test]
    fn untrained_network_outputs_one_half() {
        let mut net = Network::new(&[2, 2, 1]);
        net.set_input(&[1.0, 1.0]).unwrap();
        net.forward_prop().unwrap();
        assert_eq!(net.output().unwrap(), &[0.5]);
        assert_relative_eq!(net.cost(&[1.0]).unwrap(), 0.125);
    }

    #[test]
    fn from_layers_rejects_broken_chain() {
        let layers = vec![Layer::new(2, 3), Layer::new(4, 1)];
        assert_eq!(
            Network::from_layers(layers).err(),
            Some(NnError::DimensionMismatch { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn back_prop_matches_hand_computed_two_layer_step() {
        let hidden = Layer::from_weights(Matrix::from_data(vec![vec![0.4, 0.6]]).unwrap());
        let top = Layer::from_weights(Matrix::from_data(vec![vec![0.8]]).unwrap());
        let mut net = Network::from_layers(vec![hidden, top]).unwrap();
        let x = [1.0, 0.5];
        net.set_input(&x).unwrap();
        net.forward_prop().unwrap();

        let h = sigmoid_of(0.4 * 1.0 + 0.6 * 0.5);
        let o = sigmoid_of(0.8 * h);
        let g_top = (o - 0.0) * o * (1.0 - o);
        // the hidden delta must use the top weight before it moved
        let g_hidden = 0.8 * g_top * h * (1.0 - h);

        net.back_prop(&[0.0], 0.5).unwrap();

        let top_w = net.layers()[1].weights().data[0][0];
        let hidden_w = &net.layers()[0].weights().data[0];
        assert_relative_eq!(top_w, 0.8 - 0.5 * g_top * h);
        assert_relative_eq!(hidden_w[0], 0.4 - 0.5 * g_hidden * 1.0);
        assert_relative_eq!(hidden_w[1], 0.6 - 0.5 * g_hidden * 0.5);
        assert_eq!(net.input(), &x);
    }

    fn sigmoid_of(z: f64) -> f64 {
        crate::math::functions::sigmoid(z)
    }
}
