//! This example trains a WiSARD network on the MNIST handwritten digits and reports test accuracy.
//!
//! Every pixel is thresholded into a single binary symbol, so one image is a 784 symbol input.
//! The input positions are shuffled with a fixed seed, which lets each RAM node look at pixels
//! from all over the image instead of one horizontal strip.
//!
//! Set `RUST_LOG=debug` to see the network's own log output.

use anyhow::Result;
use mnist::{Mnist, MnistBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wisard_rs::{Symbol, Wisard, WisardParams};

const IMAGE_SIZE: usize = 28 * 28;

fn binarize(image: &[u8], into: &mut [Symbol]) {
    for (symbol, &pixel) in into.iter_mut().zip(image) {
        *symbol = Symbol::from(pixel > 127);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Loading MNIST dataset...");

    let Mnist {
        trn_img,
        trn_lbl,
        tst_img,
        tst_lbl,
        ..
    } = MnistBuilder::new()
        .label_format_digit()
        .training_set_length(60_000)
        .test_set_length(10_000)
        .finalize();

    let mut params = WisardParams::new(IMAGE_SIZE, 28, 10);
    params.strict_partitioning = true;
    params.mapping_seed = Some(42);
    let mut wisard = Wisard::with_params(params)?;

    info!(
        "Training WiSARD with {} RAM nodes per class on {} images...",
        wisard.num_rams(),
        trn_lbl.len()
    );

    let mut input = vec![0; IMAGE_SIZE];

    for (i, &label) in trn_lbl.iter().enumerate() {
        binarize(&trn_img[i * IMAGE_SIZE..(i + 1) * IMAGE_SIZE], &mut input);
        wisard.train(&input, label as usize)?;
    }

    info!("Training complete. Testing on {} images...", tst_lbl.len());

    for bleach in [1, 2, 4, 8] {
        let mut correct_predictions = 0;

        for (i, &label) in tst_lbl.iter().enumerate() {
            binarize(&tst_img[i * IMAGE_SIZE..(i + 1) * IMAGE_SIZE], &mut input);
            if wisard.predict(&input, bleach)? == label as usize {
                correct_predictions += 1;
            }
        }

        info!(
            "Bleach {}: accuracy {:.2}%, correct {} of {}",
            bleach,
            100.0 * (correct_predictions as f32 / tst_lbl.len() as f32),
            correct_predictions,
            tst_lbl.len()
        );
    }

    Ok(())
}
