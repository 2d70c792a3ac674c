//! `weights`: inspect or reset the learned weights file.

use std::io::Write;
use std::path::Path;

use adaptive_ai::store::{FileStore, ParameterStore};
use adaptive_ai::weights::{Feature, LearnedWeights};

use crate::error::CliError;

/// Prints each weight and the average, or with `reset` overwrites the file
/// with the default weights first.
///
/// # Errors
///
/// A corrupted file is reported as [`CliError::Ai`] unless `reset` is set.
pub fn handle_weights_command(path: &Path, reset: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let mut store = FileStore::new(path);
    let weights = if reset {
        let defaults = LearnedWeights::default();
        store.save(&defaults)?;
        writeln!(out, "Reset {} to default weights", path.display())?;
        defaults
    } else {
        if !path.exists() {
            writeln!(out, "{} does not exist yet, showing defaults", path.display())?;
        }
        store.load()?
    };

    for feature in Feature::ALL {
        writeln!(out, "{:<20} {:.4}", feature.name(), weights.get(feature))?;
    }
    writeln!(out, "{:<20} {:.4}", "average", weights.average())?;
    Ok(())
}
