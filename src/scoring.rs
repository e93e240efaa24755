use crate::types::CanonicalLabel;
use std::path::Path;

/// Counters for one run. `labeled` counts records whose gold was a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub written: usize,
    pub labeled: usize,
    pub correct: usize,
}

impl RunStats {
    pub fn record(&mut self, predicted: CanonicalLabel, gold: Option<CanonicalLabel>) {
        self.written += 1;
        if let Some(gold) = gold {
            self.labeled += 1;
            if gold == predicted {
                self.correct += 1;
            }
        }
    }

    pub fn accuracy(&self) -> Option<f64> {
        (self.labeled > 0).then(|| self.correct as f64 / self.labeled as f64)
    }

    /// The console summary: always the `[Done]` line, plus `[Eval]` when any
    /// record carried a gold label.
    pub fn summary_lines(&self, output: &Path) -> Vec<String> {
        let mut lines = vec![format!("[Done] wrote {} lines to {}", self.written, output.display())];
        if let Some(acc) = self.accuracy() {
            lines.push(format!(
                "[Eval] accuracy = {acc:.4}  ({} labeled examples)",
                self.labeled
            ));
        }
        lines
    }
}
