/// Mask application and penalty-based mask selection
use tracing::trace;

use crate::encoder::format::FormatInfo;
use crate::encoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// XOR the mask pattern over every data module; function modules are untouched
pub fn apply_mask(matrix: &mut BitMatrix, mask_pattern: MaskPattern, function: &FunctionMask) {
    let size = matrix.size();
    for y in 0..size {
        for x in 0..size {
            if !function.is_function(x, y) && mask_pattern.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Apply every candidate mask (or only `forced`), draw the format bits, and keep
/// the lowest-penalty result. Ties keep the lower mask id.
pub fn select_mask(
    unmasked: &BitMatrix,
    function: &FunctionMask,
    ec_level: ECLevel,
    forced: Option<MaskPattern>,
) -> (BitMatrix, MaskPattern, u32) {
    let candidates: &[MaskPattern] = match &forced {
        Some(mask) => std::slice::from_ref(mask),
        None => &MaskPattern::ALL,
    };

    let mut best: Option<(BitMatrix, MaskPattern, u32)> = None;
    for &mask_pattern in candidates {
        let mut candidate = unmasked.clone();
        apply_mask(&mut candidate, mask_pattern, function);
        FormatInfo::new(ec_level, mask_pattern).draw(&mut candidate);
        let score = penalty_score(&candidate);
        trace!(mask = mask_pattern.id(), score, "mask candidate");

        if best.as_ref().is_none_or(|(_, _, best_score)| score < *best_score) {
            best = Some((candidate, mask_pattern, score));
        }
    }

    match best {
        Some(result) => result,
        // Candidate list is never empty
        None => (unmasked.clone(), MaskPattern::Pattern0, u32::MAX),
    }
}

/// Sum of the four penalty rules for a finished matrix
pub fn penalty_score(matrix: &BitMatrix) -> u32 {
    let size = matrix.size();
    if size == 0 {
        return 0;
    }
    let mut result = 0;

    // Rules 1 and 3: same-color runs and finder-like sequences, both directions
    for y in 0..size {
        result += line_penalty(size, (0..size).map(|x| matrix.get(x, y)));
    }
    for x in 0..size {
        result += line_penalty(size, (0..size).map(|y| matrix.get(x, y)));
    }

    // Rule 2: 2x2 blocks of one color
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let color = matrix.get(x, y);
            if color == matrix.get(x + 1, y)
                && color == matrix.get(x, y + 1)
                && color == matrix.get(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }

    // Rule 4: dark/light balance, 10 points per 5% step away from 50%
    let dark = matrix.count_dark();
    let total = size * size;
    let k = (((dark * 20).abs_diff(total * 10) + total - 1) / total).saturating_sub(1);
    result + k as u32 * PENALTY_N4
}

fn line_penalty(size: usize, modules: impl Iterator<Item = bool>) -> u32 {
    let mut result = 0;
    let mut history = RunHistory::new(size);
    let mut color = false;
    let mut run = 0usize;

    for dark in modules {
        if dark == color {
            run += 1;
            if run == 5 {
                result += PENALTY_N1;
            } else if run > 5 {
                result += 1;
            }
        } else {
            history.push(run);
            if !color {
                result += history.count_finder_like() * PENALTY_N3;
            }
            color = dark;
            run = 1;
        }
    }
    result + history.terminate(color, run) * PENALTY_N3
}

/// Lengths of the last seven runs along a line, newest first.
/// The light quiet zone around the symbol counts as part of the first and last runs.
struct RunHistory {
    size: usize,
    runs: [usize; 7],
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self {
            size,
            runs: [0; 7],
        }
    }

    fn push(&mut self, mut run: usize) {
        if self.runs[0] == 0 {
            run += self.size;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = run;
    }

    /// 1:1:3:1:1 dark-light pattern with a 4-module light run on either side
    fn count_finder_like(&self) -> u32 {
        let h = &self.runs;
        let n = h[1];
        let core = n > 0 && h[2] == n && h[3] == n * 3 && h[4] == n && h[5] == n;
        u32::from(core && h[0] >= n * 4 && h[6] >= n) + u32::from(core && h[6] >= n * 4 && h[0] >= n)
    }

    fn terminate(&mut self, color: bool, mut run: usize) -> u32 {
        if color {
            self.push(run);
            run = 0;
        }
        run += self.size;
        self.push(run);
        self.count_finder_like()
    }
}
