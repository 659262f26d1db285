//! CLI definition and dispatch.

mod generate;
mod recover;

use std::path::PathBuf;

use clap::Parser;
use mnemo::WordList;

/// Mnemo - generate BIP-39 mnemonics and recover phrases with missing words.
///
/// With no WORDS, a fresh mnemonic is generated. Otherwise the words form a
/// phrase in which every token that is not a list word (for example `?`) is
/// unknown, and every valid completion is printed as `<seed> -> <address>`.
#[derive(Parser)]
#[command(name = "mnemo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Phrase to recover; unknown positions may be any non-word token.
    #[arg(value_name = "WORDS")]
    pub phrase: Vec<String>,

    /// Number of words to generate (12, 15, 18, 21, or 24).
    #[arg(short, long, default_value = "12")]
    pub words: usize,

    /// BIP39 passphrase used for seed derivation.
    #[arg(short, long)]
    pub passphrase: Option<String>,

    /// Load a 2048-word list from a file instead of the English list.
    #[arg(long, value_name = "PATH")]
    pub wordlist: Option<PathBuf>,

    /// Search unknown positions on all CPU cores.
    #[arg(long)]
    pub parallel: bool,

    /// Stop after this many completions.
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Expand unique 4+ letter prefixes to full words.
    #[arg(long)]
    pub expand: bool,

    /// Print the phrase in front of each recovered seed.
    #[arg(long)]
    pub show_phrase: bool,

    /// Show a progress bar on stderr while searching.
    #[arg(long)]
    pub progress: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run generation or recovery depending on the positional words.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let wordlist = match &self.wordlist {
            Some(path) => WordList::load(path)?,
            None => WordList::english(),
        };

        if self.phrase.is_empty() {
            generate::execute(&self, &wordlist)
        } else {
            recover::execute(&self, &wordlist)
        }
    }

    fn passphrase(&self) -> &str {
        self.passphrase.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_words_means_generate() {
        let cli = Cli::try_parse_from(["mnemo", "--words", "24"]).unwrap();
        assert!(cli.phrase.is_empty());
        assert_eq!(cli.words, 24);
        assert_eq!(cli.passphrase(), "");
    }

    #[test]
    fn test_words_are_positional() {
        let cli = Cli::try_parse_from([
            "mnemo", "-p", "TREZOR", "--parallel", "--limit", "3", "new", "?", "zoo",
        ])
        .unwrap();
        assert_eq!(cli.phrase, ["new", "?", "zoo"]);
        assert_eq!(cli.passphrase(), "TREZOR");
        assert!(cli.parallel);
        assert_eq!(cli.limit, Some(3));
    }
}
