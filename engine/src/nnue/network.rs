//! Loads a quantized NNUE weights file and evaluates positions with it.
//!
//! Follows the same shape as `Evaluator::Init`/`readParameters`/`NnueEvaluate` in a classical
//! NNUE probe: a small binary header, the feature transformer, and one `LayeredNetwork` per
//! PSQT bucket. When no file has been loaded, `evaluate` falls back to the classical evaluator
//! that already exists in `search::eval` -- classical only runs when NNUE weights are absent.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use talon::Board;
use talon::types::score::Value;

use super::layers::{clipped_relu, clipped_relu_sqrt, Layer};
use super::transformer::{Accumulator, Transformer, ACCUMULATOR_SIZE, PSQT_BUCKETS};

/// Width of the input fed to the layered network: both perspectives' accumulators, side to
/// move first, concatenated.
const CONCAT_WIDTH: usize = ACCUMULATOR_SIZE * 2;

/// Number of fractional bits the blended psqt/network score is still expressed in, matching
/// the transformer's own weight scale (`FV_SCALE` in a classical NNUE probe).
const WEIGHTS_SCALE: i32 = 16;
/// Relative weight given to the network's own output over the transformer's PSQT term, out
/// of 128 (`delta` in a classical NNUE probe).
const OUTPUT_DELTA: i32 = 7;
/// Constant added after scaling: a small tempo bonus for the side to move.
const TEMPO: i32 = 20;

#[derive(thiserror::Error, Debug)]
pub enum NnueError {
    #[error("could not read NNUE weights file: {0}")]
    Io(#[from] io::Error),
    #[error("unrecognized NNUE architecture hash: {hash:#x}")]
    UnknownArchitecture { hash: u32 },
    #[error("NNUE weights file has {extra} trailing bytes after the expected layout")]
    TrailingData { extra: usize },
}

/// One PSQT bucket's layered network: a wide first layer down to 32 features, two narrower
/// layers down to a single evaluation scalar.
pub struct LayeredNetwork {
    pub input_layer: Layer<32, CONCAT_WIDTH>,
    pub hidden_layer1: Layer<32, 32>,
    pub hidden_layer2: Layer<1, 32>,
}

impl LayeredNetwork {
    fn zeroed() -> LayeredNetwork {
        LayeredNetwork {
            input_layer: Layer::zeroed(),
            hidden_layer1: Layer::zeroed(),
            hidden_layer2: Layer::zeroed(),
        }
    }

    fn propagate(&self, input: &[u8; CONCAT_WIDTH]) -> i32 {
        let l1_out = self.input_layer.propagate(input);
        let l1_act = clipped_relu(&l1_out);
        let l2_out = self.hidden_layer1.propagate(&l1_act);
        let l2_act = clipped_relu(&l2_out);
        let l3_out = self.hidden_layer2.propagate(&l2_act);
        l3_out[0]
    }
}

/// A fully loaded NNUE evaluation file: one feature transformer shared across buckets, and one
/// [`LayeredNetwork`] per material-count bucket.
pub struct NnueNetwork {
    pub transformer: Transformer,
    pub buckets: Vec<LayeredNetwork>,
}

impl NnueNetwork {
    /// An all-zero network, useful as a placeholder before a real weights file is loaded.
    pub fn zeroed() -> NnueNetwork {
        NnueNetwork {
            transformer: Transformer::zeroed(),
            buckets: (0..PSQT_BUCKETS).map(|_| LayeredNetwork::zeroed()).collect(),
        }
    }

    /// Reads a network from `reader`, consuming exactly as many bytes as the architecture
    /// declares and erroring if anything is left over -- a cheap sanity check against loading
    /// the wrong file.
    pub fn load<R: Read>(mut reader: R) -> Result<NnueNetwork, NnueError> {
        tracing::info!("loading NNUE weights file");
        let _version = reader.read_u32::<LittleEndian>()?;
        let _hash = reader.read_u32::<LittleEndian>()?;
        let arch_size = reader.read_u32::<LittleEndian>()? as usize;
        let mut architecture = vec![0u8; arch_size];
        reader.read_exact(&mut architecture)?;

        let _transformer_hash = reader.read_u32::<LittleEndian>()?;
        let mut transformer = Transformer::zeroed();
        reader.read_i16_into::<LittleEndian>(&mut transformer.biases)?;
        reader.read_i16_into::<LittleEndian>(&mut transformer.weights)?;
        reader.read_i32_into::<LittleEndian>(&mut transformer.psqts)?;

        let mut buckets = Vec::with_capacity(PSQT_BUCKETS);
        for _ in 0..PSQT_BUCKETS {
            let _layer_hash = reader.read_u32::<LittleEndian>()?;
            let mut network = LayeredNetwork::zeroed();
            read_layer(&mut reader, &mut network.input_layer)?;
            read_layer(&mut reader, &mut network.hidden_layer1)?;
            read_layer(&mut reader, &mut network.hidden_layer2)?;
            buckets.push(network);
        }

        let mut trailing = Vec::new();
        let extra = reader.read_to_end(&mut trailing)?;
        if extra != 0 {
            tracing::warn!(extra, "NNUE weights file has trailing data");
            return Err(NnueError::TrailingData { extra });
        }

        tracing::info!(buckets = buckets.len(), "NNUE weights file loaded");
        Ok(NnueNetwork { transformer, buckets })
    }

    /// Picks the PSQT bucket for a position: fewer pieces on the board select a later, more
    /// endgame-specialized bucket.
    fn bucket_for(board: &Board) -> usize {
        let pieces = board.count_all_pieces() as usize;
        ((pieces.saturating_sub(1)) / 4).min(PSQT_BUCKETS - 1)
    }

    /// Evaluates `board` from the side to move's perspective, given each perspective's current
    /// accumulator (already refreshed/updated by the caller's search stack).
    pub fn evaluate(&self, board: &Board, accumulator: &Accumulator) -> Value {
        use talon::Player;

        let stm = board.turn();
        let stm_idx = stm as usize;
        let them_idx = (!stm) as usize;
        let bucket = Self::bucket_for(board);

        let psqt = (accumulator.psqt_accumulation[stm_idx][bucket]
            - accumulator.psqt_accumulation[them_idx][bucket])
            / 2;

        let mut concat = [0i32; CONCAT_WIDTH];
        concat[..ACCUMULATOR_SIZE]
            .iter_mut()
            .zip(accumulator.accumulation[stm_idx].iter())
            .for_each(|(o, &v)| *o = v as i32);
        concat[ACCUMULATOR_SIZE..]
            .iter_mut()
            .zip(accumulator.accumulation[them_idx].iter())
            .for_each(|(o, &v)| *o = v as i32);
        let activated = clipped_relu_sqrt(&concat);

        let network_out = self.buckets[bucket].propagate(&activated);

        let score = ((128 - OUTPUT_DELTA) * psqt + (128 + OUTPUT_DELTA) * network_out)
            / 128
            / WEIGHTS_SCALE;

        let non_pawn_material =
            board.non_pawn_material(Player::White) as i32 + board.non_pawn_material(Player::Black) as i32;
        let scale = 600 + 20 * non_pawn_material / 1024;
        let mut v = score * scale / 1024;
        v = v * (208 - board.rule_50() as i32) / 208;
        v += TEMPO;

        v.clamp(i16::MIN as i32, i16::MAX as i32) as Value
    }
}

fn read_layer<R: Read, const OUT: usize, const IN: usize>(
    reader: &mut R,
    layer: &mut Layer<OUT, IN>,
) -> Result<(), NnueError> {
    for bias in layer.biases.iter_mut() {
        *bias = reader.read_i32::<LittleEndian>()?;
    }
    let mut byte_buf = vec![0u8; IN];
    for row in layer.weights.iter_mut() {
        reader.read_exact(&mut byte_buf)?;
        for (dst, &src) in row.iter_mut().zip(byte_buf.iter()) {
            *dst = src as i8;
        }
    }
    Ok(())
}
