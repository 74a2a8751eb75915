//! The `Wisard` network is a weightless neural classifier built from banks of RAM nodes.
//!
//! Layout:
//! - The input vector is cut into `num_rams = input_size / ram_size` windows of `ram_size` symbols.
//! - Every class owns one bank with one `RamNode` per window, indexed as `[class][partition]`.
//! - Trailing symbols that do not fill a whole window are ignored by both training and prediction.
//!
//! Training:
//! - Each window of the sample is encoded as an `Address` and counted in the labelled class's bank.
//!
//! Prediction:
//! - Each class scores the number of windows whose node has seen the current address at least
//!   `bleach` times. Classes are scored in parallel with rayon.
//! - The winner is the highest score. Scores are reduced in class-index order with a strict
//!   comparison, so the lowest class index wins a tie no matter which worker finished first.
//!
//! Optionally the input positions can be shuffled once at construction with a seeded RNG, so that
//! each node watches a scattered set of positions instead of a contiguous window.

use super::{
    address::{Address, Symbol},
    ram_node::{RamNode, DEFAULT_THRESHOLD},
};
use crate::error::{Result, WisardError};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Construction parameters of a `Wisard` network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WisardParams {
    /// Number of input symbols the network reads.
    pub input_size: usize,

    /// Number of symbols in each RAM node's window.
    pub ram_size: usize,

    /// Number of output classes.
    pub num_classes: usize,

    /// If true, `ram_size` must divide `input_size` exactly. Otherwise the remainder is dropped.
    #[serde(default)]
    pub strict_partitioning: bool,

    /// Seed of the input position shuffle. `None` keeps windows contiguous.
    #[serde(default)]
    pub mapping_seed: Option<u64>,
}

impl WisardParams {
    /// Parameters with contiguous windows and the truncating partition policy.
    pub fn new(input_size: usize, ram_size: usize, num_classes: usize) -> Self {
        Self {
            input_size,
            ram_size,
            num_classes,
            strict_partitioning: false,
            mapping_seed: None,
        }
    }

    /// Checks the parameters and returns the number of RAM nodes per class.
    fn validate(&self) -> Result<usize> {
        if self.input_size == 0 {
            return Err(WisardError::InvalidConfig(
                "input_size must be at least 1".into(),
            ));
        }
        if self.ram_size == 0 {
            return Err(WisardError::InvalidConfig("ram_size must be at least 1".into()));
        }
        if self.num_classes == 0 {
            return Err(WisardError::InvalidConfig(
                "num_classes must be at least 1".into(),
            ));
        }
        if self.ram_size > self.input_size {
            return Err(WisardError::InvalidConfig(format!(
                "ram_size {} exceeds input_size {}",
                self.ram_size, self.input_size
            )));
        }

        let remainder = self.input_size % self.ram_size;
        if remainder != 0 {
            if self.strict_partitioning {
                return Err(WisardError::InvalidConfig(format!(
                    "ram_size {} does not divide input_size {}",
                    self.ram_size, self.input_size
                )));
            }
            warn!(
                input_size = self.input_size,
                ram_size = self.ram_size,
                ignored = remainder,
                "ram_size does not divide input_size, trailing symbols are ignored"
            );
        }

        Ok(self.input_size / self.ram_size)
    }
}

/// WiSARD classifier: a `[class][partition]` grid of RAM nodes.
#[derive(Clone, Debug)]
pub struct Wisard {
    params: WisardParams,

    /// Number of RAM nodes in each class bank.
    num_rams: usize,

    /// Input position read by each slot of each window, if shuffled.
    /// Holds `num_rams * ram_size` entries; window `r` reads `mapping[r * ram_size..][..ram_size]`.
    mapping: Option<Vec<usize>>,

    /// RAM node banks indexed as `[class][partition]`.
    ram_nodes: Vec<Vec<RamNode>>,
}

impl Wisard {
    /// Creates a network with contiguous windows.
    ///
    /// Fails with `InvalidConfig` if any size is zero or `ram_size > input_size`.
    /// If `ram_size` does not divide `input_size` the trailing symbols are ignored.
    pub fn new(input_size: usize, ram_size: usize, num_classes: usize) -> Result<Self> {
        Self::with_params(WisardParams::new(input_size, ram_size, num_classes))
    }

    /// Creates a network from explicit parameters.
    pub fn with_params(params: WisardParams) -> Result<Self> {
        let num_rams = params.validate()?;

        let mapping = params.mapping_seed.map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut positions: Vec<usize> = (0..num_rams * params.ram_size).collect();
            positions.shuffle(&mut rng);
            positions
        });

        let ram_nodes = (0..params.num_classes)
            .map(|_| vec![RamNode::new(); num_rams])
            .collect();

        debug!(
            input_size = params.input_size,
            ram_size = params.ram_size,
            num_classes = params.num_classes,
            num_rams,
            shuffled = mapping.is_some(),
            "created WiSARD network"
        );

        Ok(Self {
            params,
            num_rams,
            mapping,
            ram_nodes,
        })
    }

    pub fn params(&self) -> &WisardParams {
        &self.params
    }

    pub fn input_size(&self) -> usize {
        self.params.input_size
    }

    pub fn ram_size(&self) -> usize {
        self.params.ram_size
    }

    pub fn num_classes(&self) -> usize {
        self.params.num_classes
    }

    /// Number of RAM nodes per class.
    pub fn num_rams(&self) -> usize {
        self.num_rams
    }

    /// Returns the RAM node for a class and partition, if both are in range.
    pub fn ram(&self, class: usize, partition: usize) -> Option<&RamNode> {
        self.ram_nodes.get(class)?.get(partition)
    }

    /// Trains the bank of `class` on one sample.
    ///
    /// Nothing is written unless both the input length and the class are valid.
    pub fn train(&mut self, input: &[Symbol], class: usize) -> Result<()> {
        self.check_input(input)?;
        self.check_class(class)?;
        self.train_unchecked(input, class);
        Ok(())
    }

    /// Trains on a batch of samples. Every sample is validated before the first one is written,
    /// so a bad sample leaves the network untouched.
    pub fn train_batch<S>(&mut self, samples: &[(S, usize)]) -> Result<()>
    where
        S: AsRef<[Symbol]>,
    {
        for (input, class) in samples {
            self.check_input(input.as_ref())?;
            self.check_class(*class)?;
        }
        for (input, class) in samples {
            self.train_unchecked(input.as_ref(), *class);
        }
        debug!(samples = samples.len(), "trained batch");
        Ok(())
    }

    /// Computes the activation score of every class, in class-index order.
    ///
    /// A score is the number of partitions whose node saw the current address at least `bleach`
    /// times. A `bleach` of 0 is treated as 1.
    pub fn scores(&self, input: &[Symbol], bleach: u64) -> Result<Vec<usize>> {
        self.check_input(input)?;
        let bleach = effective_bleach(bleach);
        let addresses = self.encode(input);

        let scores: Vec<usize> = self
            .ram_nodes
            .par_iter()
            .map(|bank| {
                bank.iter()
                    .zip(&addresses)
                    .filter(|(node, address)| node.predict(address, bleach))
                    .count()
            })
            .collect();

        Ok(scores)
    }

    /// Predicts the class of `input` using the given bleaching threshold.
    ///
    /// Ties go to the lowest class index. An untrained network therefore predicts class 0.
    pub fn predict(&self, input: &[Symbol], bleach: u64) -> Result<usize> {
        let scores = self.scores(input, bleach)?;
        let predicted = first_argmax(&scores);
        trace!(predicted, score = scores[predicted], bleach, "predicted");
        Ok(predicted)
    }

    /// `predict` with a bleaching threshold of 1.
    pub fn predict_default(&self, input: &[Symbol]) -> Result<usize> {
        self.predict(input, DEFAULT_THRESHOLD)
    }

    /// Predicts every input of a batch. Fails on the first invalid input.
    pub fn predict_batch<S>(&self, inputs: &[S], bleach: u64) -> Result<Vec<usize>>
    where
        S: AsRef<[Symbol]>,
    {
        inputs
            .iter()
            .map(|input| self.predict(input.as_ref(), bleach))
            .collect()
    }

    /// Returns the address each partition derives from `input`.
    pub fn addresses(&self, input: &[Symbol]) -> Result<Vec<Address>> {
        self.check_input(input)?;
        Ok(self.encode(input))
    }

    /// Writes one already validated sample into the bank of `class`.
    fn train_unchecked(&mut self, input: &[Symbol], class: usize) {
        let addresses = self.encode(input);
        for (node, address) in self.ram_nodes[class].iter_mut().zip(addresses) {
            node.train(address);
        }
        trace!(class, "trained sample");
    }

    /// Encodes every partition of `input`, in partition order.
    fn encode(&self, input: &[Symbol]) -> Vec<Address> {
        let ram_size = self.params.ram_size;

        match &self.mapping {
            None => input[..self.num_rams * ram_size]
                .chunks_exact(ram_size)
                .map(Address::encode)
                .collect(),
            Some(mapping) => mapping
                .chunks_exact(ram_size)
                .map(|positions| {
                    Address::encode_iter(ram_size, positions.iter().map(|&i| input[i]))
                })
                .collect(),
        }
    }

    fn check_input(&self, input: &[Symbol]) -> Result<()> {
        if input.len() < self.params.input_size {
            return Err(WisardError::InvalidInput {
                expected: self.params.input_size,
                got: input.len(),
            });
        }
        Ok(())
    }

    fn check_class(&self, class: usize) -> Result<()> {
        if class >= self.params.num_classes {
            return Err(WisardError::InvalidClass {
                class,
                num_classes: self.params.num_classes,
            });
        }
        Ok(())
    }
}

/// Clamps a bleaching threshold of 0, which would activate every node, to 1.
fn effective_bleach(bleach: u64) -> u64 {
    if bleach == 0 {
        debug!("bleach of 0 clamped to 1");
        DEFAULT_THRESHOLD
    } else {
        bleach
    }
}

/// Index of the first maximum. Expects a non-empty slice.
fn first_argmax(scores: &[usize]) -> usize {
    let mut predicted = 0;
    for (class, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[predicted] {
            predicted = class;
        }
    }
    predicted
}
