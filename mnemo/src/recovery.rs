//! Recovery of phrases with missing or corrupted words.
//!
//! Every token that is not in the word list marks an unknown position. The
//! search assigns each of the 2048 words to every unknown position, depth
//! first and left to right, and keeps the candidates whose checksum holds.
//! The cost is `2048^k` checksum evaluations for `k` unknown positions; the
//! checksum depends on the full entropy, so partial candidates cannot be
//! pruned.
//!
//! # Example
//!
//! ```
//! use mnemo::{RecoverySearch, WordList};
//!
//! let words = WordList::english();
//! let search = RecoverySearch::new(&words);
//! let found = search
//!     .crack("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon ?")
//!     .unwrap();
//! assert!(found.iter().any(|r| r.mnemonic.to_string().ends_with(" about")));
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use zeroize::Zeroizing;

use crate::codec::{Mnemonic, MnemonicCodec};
use crate::seed::Seed;
use crate::wordlist::WORDLIST_LEN;
use crate::{Result, WordCount, WordList};

/// A phrase in which some positions are unknown.
#[derive(Clone, PartialEq, Eq)]
pub struct PartialMnemonic {
    slots: Vec<Option<u16>>,
    unknown: Vec<usize>,
}

impl PartialMnemonic {
    /// Split `phrase` on whitespace; tokens missing from `wordlist` become
    /// unknown positions.
    pub fn parse(wordlist: &WordList, phrase: &str) -> Self {
        Self::from_slots(phrase.split_whitespace().map(|t| wordlist.index_of(t)).collect())
    }

    /// Like [`parse`](Self::parse), but a token that is a unique prefix of
    /// at least four characters is expanded to the word it abbreviates.
    pub fn parse_expanding(wordlist: &WordList, phrase: &str) -> Self {
        Self::from_slots(
            phrase
                .split_whitespace()
                .map(|t| {
                    wordlist
                        .resolve_prefix(t)
                        .ok()
                        .and_then(|w| wordlist.index_of(w))
                })
                .collect(),
        )
    }

    /// Build from explicit slots; `None` marks an unknown position.
    pub fn from_slots(slots: Vec<Option<u16>>) -> Self {
        let unknown = slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect();
        Self { slots, unknown }
    }

    /// Number of positions, known or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the phrase has no tokens at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Word index per position, `None` where unknown.
    #[inline]
    pub fn slots(&self) -> &[Option<u16>] {
        &self.slots
    }

    /// Unknown positions in left-to-right order.
    #[inline]
    pub fn unknown_positions(&self) -> &[usize] {
        &self.unknown
    }

    /// Number of candidates a full search evaluates, if it fits in a `u64`.
    pub fn candidate_count(&self) -> Option<u64> {
        let k = u32::try_from(self.unknown.len()).ok()?;
        (WORDLIST_LEN as u64).checked_pow(k)
    }

    /// Known words, with unknown positions set to index 0.
    fn template(&self) -> Vec<u16> {
        self.slots.iter().map(|s| s.unwrap_or(0)).collect()
    }
}

impl core::fmt::Debug for PartialMnemonic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "PartialMnemonic({} words, unknown at {:?})",
            self.slots.len(),
            self.unknown
        )
    }
}

/// One checksum-valid completion and its seed.
#[derive(Clone, Debug)]
pub struct RecoveryResult<'w> {
    /// The completed phrase.
    pub mnemonic: Mnemonic<'w>,
    /// Seed derived from the phrase and the search passphrase.
    pub seed: Seed,
}

/// Live counters for a running search.
///
/// Safe to read from another thread while the search is in progress.
#[derive(Debug)]
pub struct SearchStats {
    checked: AtomicU64,
    found: AtomicU64,
    epoch: Instant,
    started_at: AtomicU64,
}

impl SearchStats {
    fn new() -> Self {
        Self {
            checked: AtomicU64::new(0),
            found: AtomicU64::new(0),
            epoch: Instant::now(),
            started_at: AtomicU64::new(0),
        }
    }

    fn reset(&self) {
        self.checked.store(0, Ordering::Relaxed);
        self.found.store(0, Ordering::Relaxed);
        let now = self.epoch.elapsed().as_nanos() as u64;
        self.started_at.store(now, Ordering::Relaxed);
    }

    fn add_checked(&self, n: u64) {
        self.checked.fetch_add(n, Ordering::Relaxed);
    }

    fn increment_found(&self) {
        self.found.fetch_add(1, Ordering::Relaxed);
    }

    /// Candidates whose checksum has been evaluated.
    pub fn checked(&self) -> u64 {
        self.checked.load(Ordering::Relaxed)
    }

    /// Completions emitted so far.
    pub fn found(&self) -> u64 {
        self.found.load(Ordering::Relaxed)
    }

    /// Time since the current (or last) search started.
    pub fn elapsed(&self) -> Duration {
        let started = Duration::from_nanos(self.started_at.load(Ordering::Relaxed));
        self.epoch.elapsed().saturating_sub(started)
    }

    /// Candidates per second.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.checked() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Exhaustive, checksum-filtered search over unknown word positions.
pub struct RecoverySearch<'w> {
    codec: MnemonicCodec<'w>,
    passphrase: Zeroizing<String>,
    parallel: bool,
    expand_prefixes: bool,
    limit: Option<usize>,
    cancel: Arc<AtomicBool>,
    stats: Arc<SearchStats>,
}

impl<'w> RecoverySearch<'w> {
    /// Create a sequential search over `wordlist` with an empty passphrase.
    pub fn new(wordlist: &'w WordList) -> Self {
        Self {
            codec: MnemonicCodec::new(wordlist),
            passphrase: Zeroizing::new(String::new()),
            parallel: false,
            expand_prefixes: false,
            limit: None,
            cancel: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(SearchStats::new()),
        }
    }

    /// Passphrase used when deriving each result's seed.
    pub fn passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase = Zeroizing::new(passphrase.to_owned());
        self
    }

    /// Fan the outermost unknown position out over the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Expand unique 4+ character prefixes in [`crack`](Self::crack) input.
    pub fn expand_prefixes(mut self, expand: bool) -> Self {
        self.expand_prefixes = expand;
        self
    }

    /// Stop after `limit` completions.
    ///
    /// Sequential searches return the first `limit` completions in
    /// enumeration order; parallel searches return some `limit` of them.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Share a cancellation flag; setting it stops the search at the next
    /// candidate.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    /// The cancellation flag this search observes.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Counters for the current or last run.
    pub fn stats(&self) -> Arc<SearchStats> {
        Arc::clone(&self.stats)
    }

    /// The codec used to validate candidates.
    pub const fn codec(&self) -> &MnemonicCodec<'w> {
        &self.codec
    }

    /// Parse `phrase` and return every valid completion.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedPhraseLength`] before any search
    /// work if the phrase does not have 12, 15, 18, 21 or 24 tokens.
    pub fn crack(&self, phrase: &str) -> Result<Vec<RecoveryResult<'w>>> {
        let wordlist = self.codec.wordlist();
        let partial = if self.expand_prefixes {
            PartialMnemonic::parse_expanding(wordlist, phrase)
        } else {
            PartialMnemonic::parse(wordlist, phrase)
        };
        self.run(&partial)
    }

    /// Return every valid completion of `partial` in enumeration order.
    ///
    /// Parallel and sequential runs yield the same list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedPhraseLength`] for unsupported
    /// phrase lengths.
    pub fn run(&self, partial: &PartialMnemonic) -> Result<Vec<RecoveryResult<'w>>> {
        let run = self.start(partial)?;

        let results = match partial.unknown_positions().split_first() {
            Some((&first, rest)) if self.parallel => {
                let template = partial.template();
                let branches: Vec<Vec<RecoveryResult<'w>>> = (0..WORDLIST_LEN as u16)
                    .into_par_iter()
                    .map(|index| {
                        let mut branch = Vec::new();
                        run.branch(&template, first, index, rest, &mut |r| branch.push(r));
                        branch
                    })
                    .collect();
                branches.into_iter().flatten().collect()
            }
            _ => {
                let mut results = Vec::new();
                let mut candidate = partial.template();
                run.explore(&mut candidate, partial.unknown_positions(), &mut |r| results.push(r));
                results
            }
        };

        run.finish();
        Ok(results)
    }

    /// Stream valid completions of `partial` to `sink` in enumeration order,
    /// on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedPhraseLength`] for unsupported
    /// phrase lengths.
    pub fn for_each<F>(&self, partial: &PartialMnemonic, mut sink: F) -> Result<()>
    where
        F: FnMut(RecoveryResult<'w>),
    {
        let run = self.start(partial)?;
        let mut candidate = partial.template();
        run.explore(&mut candidate, partial.unknown_positions(), &mut sink);
        run.finish();
        Ok(())
    }

    /// Stream valid completions of `partial` to `sink` from the rayon pool.
    ///
    /// Completions within one branch of the outermost unknown position
    /// arrive in order; branches arrive in any order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedPhraseLength`] for unsupported
    /// phrase lengths.
    pub fn par_for_each<F>(&self, partial: &PartialMnemonic, sink: F) -> Result<()>
    where
        F: Fn(RecoveryResult<'w>) + Sync + Send,
    {
        let run = self.start(partial)?;

        match partial.unknown_positions().split_first() {
            Some((&first, rest)) => {
                let template = partial.template();
                (0..WORDLIST_LEN as u16).into_par_iter().for_each(|index| {
                    run.branch(&template, first, index, rest, &mut |r| sink(r));
                });
            }
            None => {
                let mut candidate = partial.template();
                run.explore(&mut candidate, &[], &mut |r| sink(r));
            }
        }

        run.finish();
        Ok(())
    }

    fn start(&self, partial: &PartialMnemonic) -> Result<Run<'_, 'w>> {
        WordCount::from_words(partial.len())?;

        let unknown = partial.unknown_positions().len();
        self.stats.reset();
        tracing::debug!(
            words = partial.len(),
            unknown,
            positions = ?partial.unknown_positions(),
            candidates = ?partial.candidate_count(),
            parallel = self.parallel,
            "starting recovery search"
        );
        if unknown > 2 {
            tracing::warn!(
                unknown,
                "search space is 2048^{unknown} candidates and may not finish in practice"
            );
        }

        Ok(Run {
            search: self,
            halted: AtomicBool::new(false),
            accepted: AtomicUsize::new(0),
        })
    }
}

impl core::fmt::Debug for RecoverySearch<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecoverySearch")
            .field("parallel", &self.parallel)
            .field("expand_prefixes", &self.expand_prefixes)
            .field("limit", &self.limit)
            .field("has_passphrase", &!self.passphrase.is_empty())
            .finish_non_exhaustive()
    }
}

/// State for a single search run.
struct Run<'s, 'w> {
    search: &'s RecoverySearch<'w>,
    halted: AtomicBool,
    accepted: AtomicUsize,
}

impl<'w> Run<'_, 'w> {
    fn should_stop(&self) -> bool {
        self.halted.load(Ordering::Relaxed) || self.search.cancel.load(Ordering::Relaxed)
    }

    /// Explore one top-level branch on its own copy of the candidate.
    fn branch<F>(&self, template: &[u16], first: usize, index: u16, rest: &[usize], emit: &mut F)
    where
        F: FnMut(RecoveryResult<'w>),
    {
        if self.should_stop() {
            return;
        }
        tracing::trace!(position = first, index, "exploring branch");
        let mut candidate = template.to_vec();
        candidate[first] = index;
        self.explore(&mut candidate, rest, emit);
    }

    fn explore<F>(&self, candidate: &mut [u16], unknown: &[usize], emit: &mut F)
    where
        F: FnMut(RecoveryResult<'w>),
    {
        if self.should_stop() {
            return;
        }

        match unknown {
            [] => {
                self.search.stats.add_checked(1);
                self.check(candidate, emit);
            }
            [last] => {
                let mut tried = 0;
                for index in 0..WORDLIST_LEN as u16 {
                    if self.should_stop() {
                        break;
                    }
                    candidate[*last] = index;
                    tried += 1;
                    self.check(candidate, emit);
                }
                self.search.stats.add_checked(tried);
            }
            [next, rest @ ..] => {
                for index in 0..WORDLIST_LEN as u16 {
                    if self.should_stop() {
                        break;
                    }
                    candidate[*next] = index;
                    self.explore(candidate, rest, emit);
                }
            }
        }
    }

    fn check<F>(&self, candidate: &[u16], emit: &mut F)
    where
        F: FnMut(RecoveryResult<'w>),
    {
        let codec = &self.search.codec;
        if !codec.is_valid_indices(candidate) || !self.accept() {
            return;
        }

        let mnemonic = codec.assemble(candidate);
        let seed = mnemonic.to_seed(&self.search.passphrase);
        self.search.stats.increment_found();
        tracing::debug!(found = self.search.stats.found(), "valid completion");
        emit(RecoveryResult { mnemonic, seed });
    }

    /// Reserve a slot under the result limit.
    fn accept(&self) -> bool {
        let Some(limit) = self.search.limit else {
            return true;
        };
        let previous = self.accepted.fetch_add(1, Ordering::Relaxed);
        if previous + 1 >= limit {
            self.halted.store(true, Ordering::Relaxed);
        }
        previous < limit
    }

    fn finish(&self) {
        let stats = &self.search.stats;
        tracing::debug!(
            checked = stats.checked(),
            found = stats.found(),
            elapsed_ms = stats.elapsed().as_millis() as u64,
            stopped_early = self.should_stop(),
            "recovery search finished"
        );
    }
}
