//! Fresh mnemonic generation.

use colored::Colorize;
use mnemo::{Entropy, Mnemonic, MnemonicCodec, Seed, WordCount, WordList};
use mnemo_eth::Address;

use super::Cli;

/// Generate a mnemonic, derive its seed and print both with the address.
pub fn execute(cli: &Cli, wordlist: &WordList) -> Result<(), Box<dyn std::error::Error>> {
    let size = WordCount::from_words(cli.words)?;
    let entropy = Entropy::generate(size)?;
    let mnemonic = MnemonicCodec::new(wordlist).encode_entropy(&entropy);
    let seed = mnemonic.to_seed(cli.passphrase());
    let address = Address::from_seed(&seed)?;

    tracing::debug!(words = mnemonic.len(), "generated mnemonic");
    print_generated(&mnemonic, &seed, &address, cli.passphrase.is_some());
    Ok(())
}

#[rustfmt::skip]
fn print_generated(mnemonic: &Mnemonic<'_>, seed: &Seed, address: &Address, has_passphrase: bool) {
    println!();
    println!("      {}     {}", "Mnemonic".cyan().bold(), mnemonic.phrase().as_str());
    if has_passphrase {
        println!("      {}   {}", "Passphrase".cyan().bold(), "(set)".dimmed());
    }
    println!("      {}         {}", "Seed".cyan().bold(), seed.to_hex().as_str());
    println!("      {}      {}", "Address".cyan().bold(), address.to_hex().green());
    println!();
}
