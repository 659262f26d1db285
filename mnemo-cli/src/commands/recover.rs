//! Recovery of phrases with unknown words.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use mnemo::{PartialMnemonic, RecoveryResult, RecoverySearch, WordCount, WordList};
use mnemo_eth::Address;

use super::Cli;

/// Interval between progress bar refreshes.
const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// Search every completion of the positional words and print
/// `<seed-hex> -> <address-hex>` for each.
pub fn execute(cli: &Cli, wordlist: &WordList) -> Result<(), Box<dyn std::error::Error>> {
    let phrase = cli.phrase.join(" ");
    let partial = if cli.expand {
        PartialMnemonic::parse_expanding(wordlist, &phrase)
    } else {
        PartialMnemonic::parse(wordlist, &phrase)
    };
    WordCount::from_words(partial.len())?;

    let cancel = Arc::new(AtomicBool::new(false));
    let mut search = RecoverySearch::new(wordlist)
        .passphrase(cli.passphrase())
        .parallel(cli.parallel)
        .cancel_flag(Arc::clone(&cancel));
    if let Some(limit) = cli.limit {
        search = search.limit(limit);
    }

    let progress = if cli.progress {
        Some(progress_bar(partial.candidate_count())?)
    } else {
        None
    };

    let failure = Mutex::new(None);
    let show_phrase = cli.show_phrase;
    let sink = |result: RecoveryResult<'_>| match Address::from_seed(&result.seed) {
        Ok(address) => {
            let line = format_result(&result, &address, show_phrase);
            match &progress {
                Some(bar) => bar.suspend(|| println!("{line}")),
                None => println!("{line}"),
            }
        }
        Err(e) => {
            if let Ok(mut slot) = failure.lock() {
                slot.get_or_insert(e);
            }
            cancel.store(true, Ordering::Relaxed);
        }
    };

    let stats = search.stats();
    let done = AtomicBool::new(false);
    let outcome = thread::scope(|scope| {
        if let Some(bar) = &progress {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    bar.set_position(stats.checked());
                    thread::sleep(PROGRESS_TICK);
                }
            });
        }

        let outcome = if cli.parallel {
            search.par_for_each(&partial, &sink)
        } else {
            search.for_each(&partial, &sink)
        };
        done.store(true, Ordering::Relaxed);
        outcome
    });

    if let Some(bar) = &progress {
        bar.set_position(stats.checked());
        bar.finish_with_message(format!("{} found", stats.found()));
    }
    outcome?;

    if let Some(e) = failure.into_inner().ok().flatten() {
        return Err(e.into());
    }

    tracing::info!(
        checked = stats.checked(),
        found = stats.found(),
        rate = stats.rate(),
        "recovery finished"
    );
    Ok(())
}

fn format_result(result: &RecoveryResult<'_>, address: &Address, show_phrase: bool) -> String {
    let seed = result.seed.to_hex();
    if show_phrase {
        format!("{}: {} -> {}", result.mnemonic, seed.as_str(), address)
    } else {
        format!("{} -> {}", seed.as_str(), address)
    }
}

fn progress_bar(candidates: Option<u64>) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let bar = match candidates {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, {eta}) {msg}",
                )?
                .progress_chars("#>-"),
            );
            bar
        }
        None => ProgressBar::new_spinner(),
    };
    bar.enable_steady_tick(PROGRESS_TICK);
    Ok(bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemo::MnemonicCodec;

    #[test]
    fn test_result_line_format() {
        let words = WordList::english();
        let codec = MnemonicCodec::new(&words);
        let mnemonic = codec.encode(&[0u8; 16]).unwrap();
        let seed = mnemonic.to_seed("");
        let address = Address::from_seed(&seed).unwrap();
        let result = RecoveryResult { mnemonic, seed };

        let line = format_result(&result, &address, false);
        assert_eq!(
            line,
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4 -> ea6e8f7525e8af0669546ac6c5b8318fd2c6d7b6"
        );

        let line = format_result(&result, &address, true);
        assert!(line.starts_with("abandon abandon "));
        assert!(line.contains("about: 5eb00bbd"));
    }
}
