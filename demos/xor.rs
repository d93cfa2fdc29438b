use ferrite_mlp::Network;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut network = Network::new(&[2, 2, 1]);
    network.init_weights_random(&mut rng);

    let pairs = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let xor = |p: &[f64; 2]| [if p[0] != p[1] { 1.0 } else { 0.0 }];
    let total_cost = |network: &mut Network| -> f64 {
        pairs
            .iter()
            .map(|p| {
                network.set_input(p).unwrap();
                network.forward_prop().unwrap();
                network.cost(&xor(p)).unwrap()
            })
            .sum()
    };

    let start = total_cost(&mut network);

    let iterations = 100_000;
    for i in 0..iterations {
        let p = pairs[rng.gen_range(0..pairs.len())];
        network.set_input(&p).unwrap();
        network.forward_prop().unwrap();
        network.back_prop(&xor(&p), 1.0).unwrap();
        if i % 20_000 == 0 {
            println!("Iteration {i}: cost = {:.6}", total_cost(&mut network));
        }
    }

    let end = total_cost(&mut network);
    for p in &pairs {
        network.set_input(p).unwrap();
        network.forward_prop().unwrap();
        println!("{} ^ {} = {:.4}", p[0], p[1], network.output().unwrap()[0]);
    }
    println!("Cost at start: {start:.6}, at end: {end:.6} (seed {seed})");
    println!("A bias-free 2-2-1 net only solves XOR from some starting points; try other seeds.");
}
