//! Wheel model
//!
//! Owns the ordered entry list and its invariants: titles are trimmed,
//! non-empty and unique ignoring case. List order is slice order.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::audio::{title_from_file_name, AudioRef};

/// Fewest entries a wheel needs before it can spin
pub const MIN_SPIN_ENTRIES: usize = 2;

/// Errors reported by wheel and spin operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    #[error("Enter a song title or attach an audio file")]
    EmptyTitle,
    #[error("\"{0}\" is already on the wheel")]
    DuplicateTitle(String),
    #[error("No song named \"{0}\"")]
    NotFound(String),
    #[error("Add at least two songs to spin (have {count})")]
    InsufficientEntries { count: usize },
    #[error("Winner index {index} is outside a wheel of {count} slices")]
    WinnerOutOfRange { index: usize, count: usize },
    #[error("The wheel is already spinning")]
    SpinInProgress,
}

/// Stable entry identifier, never reused within a wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One selectable song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub audio: Option<AudioRef>,
    pub link_url: Option<String>,
}

/// Ordered entries plus the most recent winner
#[derive(Debug, Clone, Default)]
pub struct WheelState {
    entries: Vec<Entry>,
    last_winner_id: Option<EntryId>,
    next_id: u64,
}

fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/// Whether a wheel with `total_count` slices may spin
pub fn is_spinnable(total_count: usize) -> bool {
    total_count >= MIN_SPIN_ENTRIES
}

impl WheelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in slice order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title.clone()).collect()
    }

    /// Find an entry by title, ignoring case and surrounding whitespace
    pub fn find(&self, title: &str) -> Option<&Entry> {
        let key = title_key(title.trim());
        self.entries.iter().find(|e| title_key(&e.title) == key)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn index_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Identifier of the last winner, if it is still on the wheel
    pub fn last_winner_id(&self) -> Option<EntryId> {
        self.last_winner_id.filter(|id| self.get(*id).is_some())
    }

    /// The last winner, if it is still on the wheel
    pub fn last_winner(&self) -> Option<&Entry> {
        self.last_winner_id.and_then(|id| self.get(id))
    }

    /// Record a settled spin; ignored if the entry has since been removed
    pub fn set_last_winner(&mut self, id: EntryId) -> bool {
        if self.get(id).is_some() {
            self.last_winner_id = Some(id);
            true
        } else {
            false
        }
    }

    /// Resolve the title for a new entry: the trimmed input, else the audio
    /// file name without its extension
    fn resolve_title(title: &str, audio: Option<&AudioRef>) -> Result<String, WheelError> {
        let title = title.trim();
        if !title.is_empty() {
            return Ok(title.to_string());
        }
        match audio.and_then(AudioRef::file_name) {
            Some(name) => title_from_file_name(name).ok_or(WheelError::EmptyTitle),
            None => Err(WheelError::EmptyTitle),
        }
    }

    fn ensure_unique(&self, title: &str, ignore: Option<EntryId>) -> Result<(), WheelError> {
        let key = title_key(title);
        let clash = self
            .entries
            .iter()
            .any(|e| Some(e.id) != ignore && title_key(&e.title) == key);
        if clash {
            Err(WheelError::DuplicateTitle(title.to_string()))
        } else {
            Ok(())
        }
    }

    /// Append a new entry
    ///
    /// A blank title is derived from the audio file name when there is one.
    /// A blank link is treated as no link.
    pub fn add_entry(
        &mut self,
        title: &str,
        audio: Option<AudioRef>,
        link_url: Option<&str>,
    ) -> Result<Entry, WheelError> {
        let title = Self::resolve_title(title, audio.as_ref())?;
        self.ensure_unique(&title, None)?;

        let link_url = link_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        let entry = Entry {
            id: EntryId(self.next_id),
            title,
            audio,
            link_url,
        };
        self.next_id += 1;
        self.entries.push(entry.clone());

        log::debug!("Added entry {} {:?}", entry.id, entry.title);
        Ok(entry)
    }

    /// Rename the entry titled `old_title`
    pub fn rename_entry(&mut self, old_title: &str, new_title: &str) -> Result<(), WheelError> {
        let id = self
            .find(old_title)
            .map(|e| e.id)
            .ok_or_else(|| WheelError::NotFound(old_title.trim().to_string()))?;

        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Err(WheelError::EmptyTitle);
        }
        self.ensure_unique(new_title, Some(id))?;

        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            log::debug!("Renamed entry {} {:?} -> {:?}", id, entry.title, new_title);
            entry.title = new_title.to_string();
        }
        Ok(())
    }

    /// Remove every entry whose title is in `titles`; absent titles are ignored
    ///
    /// Returns how many entries were removed.
    pub fn remove_entries<I, S>(&mut self, titles: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: HashSet<String> = titles
            .into_iter()
            .map(|t| title_key(t.as_ref().trim()))
            .collect();

        let before = self.entries.len();
        self.entries.retain(|e| !keys.contains(&title_key(&e.title)));
        let removed = before - self.entries.len();

        if let Some(id) = self.last_winner_id {
            if self.get(id).is_none() {
                self.last_winner_id = None;
            }
        }

        if removed > 0 {
            log::debug!("Removed {} entries", removed);
        }
        removed
    }

    /// Whether the current list may spin
    pub fn is_spinnable(&self) -> bool {
        is_spinnable(self.entries.len())
    }

    /// Pick a winner index uniformly at random
    pub fn pick_winner(&self) -> Result<usize, WheelError> {
        self.pick_winner_with(&mut rand::rng())
    }

    /// Pick a winner index uniformly using `rng`
    pub fn pick_winner_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, WheelError> {
        let count = self.entries.len();
        if !is_spinnable(count) {
            return Err(WheelError::InsufficientEntries { count });
        }
        Ok(rng.random_range(0..count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioClip;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wheel_with(titles: &[&str]) -> WheelState {
        let mut wheel = WheelState::new();
        for title in titles {
            wheel.add_entry(title, None, None).unwrap();
        }
        wheel
    }

    fn clip(name: &str) -> AudioRef {
        AudioRef::Clip(AudioClip::from_upload(name, vec![0; 4], None))
    }

    #[test]
    fn test_add_trims_title() {
        let mut wheel = WheelState::new();
        let entry = wheel.add_entry("  Song A  ", None, Some("  ")).unwrap();
        assert_eq!(entry.title, "Song A");
        assert_eq!(entry.link_url, None);
        assert_eq!(wheel.find("song a").unwrap().title, "Song A");
    }

    #[test]
    fn test_add_keeps_link() {
        let mut wheel = WheelState::new();
        let entry = wheel
            .add_entry("Song A", None, Some(" https://example.com/a "))
            .unwrap();
        assert_eq!(entry.link_url.as_deref(), Some("https://example.com/a"));
    }

    #[test]
    fn test_title_from_audio_file() {
        let mut wheel = WheelState::new();
        let entry = wheel.add_entry("   ", Some(clip("Robot Dance.mp3")), None).unwrap();
        assert_eq!(entry.title, "Robot Dance");
        assert!(entry.audio.is_some());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut wheel = WheelState::new();
        assert_eq!(wheel.add_entry("  ", None, None), Err(WheelError::EmptyTitle));
        assert_eq!(
            wheel.add_entry("", Some(AudioRef::Url("https://x/y.mp3".into())), None),
            Err(WheelError::EmptyTitle)
        );
        assert!(wheel.is_empty());
    }

    #[test]
    fn test_duplicate_title_leaves_state_unchanged() {
        let mut wheel = wheel_with(&["Song A", "Song B"]);
        let before = wheel.entries().to_vec();
        assert_eq!(
            wheel.add_entry("song a", None, None),
            Err(WheelError::DuplicateTitle("song a".into()))
        );
        assert_eq!(wheel.entries(), &before[..]);
    }

    #[test]
    fn test_extension_only_file_name_is_empty_title() {
        let mut wheel = WheelState::new();
        assert_eq!(
            wheel.add_entry("", Some(clip(".mp3")), None),
            Err(WheelError::EmptyTitle)
        );
        // A second nameless upload reports the same error, not a duplicate
        assert_eq!(
            wheel.add_entry(" ", Some(clip(".wav")), None),
            Err(WheelError::EmptyTitle)
        );
        assert!(wheel.is_empty());
    }

    #[test]
    fn test_missing_file_name_is_untitled() {
        let mut wheel = WheelState::new();
        let entry = wheel.add_entry("", Some(clip("")), None).unwrap();
        assert_eq!(entry.title, crate::audio::UNTITLED);
    }

    #[test]
    fn test_duplicate_from_derived_title() {
        let mut wheel = wheel_with(&["robot dance"]);
        assert!(matches!(
            wheel.add_entry("", Some(clip("Robot Dance.wav")), None),
            Err(WheelError::DuplicateTitle(_))
        ));
    }

    #[test]
    fn test_ids_not_reused() {
        let mut wheel = wheel_with(&["A", "B"]);
        let b = wheel.find("B").unwrap().id;
        wheel.remove_entries(["B"]);
        let c = wheel.add_entry("C", None, None).unwrap();
        assert!(c.id > b);
    }

    #[test]
    fn test_rename() {
        let mut wheel = wheel_with(&["A", "B"]);
        wheel.rename_entry("A", "  Alpha ").unwrap();
        assert_eq!(wheel.titles(), vec!["Alpha", "B"]);

        // Case-only change of the same entry is allowed
        wheel.rename_entry("alpha", "ALPHA").unwrap();
        assert_eq!(wheel.titles(), vec!["ALPHA", "B"]);
    }

    #[test]
    fn test_rename_errors() {
        let mut wheel = wheel_with(&["A", "B"]);
        assert_eq!(
            wheel.rename_entry("Z", "Zed"),
            Err(WheelError::NotFound("Z".into()))
        );
        assert_eq!(wheel.rename_entry("A", " "), Err(WheelError::EmptyTitle));
        assert_eq!(
            wheel.rename_entry("A", "b"),
            Err(WheelError::DuplicateTitle("b".into()))
        );
        assert_eq!(wheel.titles(), vec!["A", "B"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut wheel = wheel_with(&["A", "B", "C", "D"]);
        let removed = wheel.remove_entries(["B", "D", "missing"]);
        assert_eq!(removed, 2);
        let once = wheel.entries().to_vec();

        assert_eq!(wheel.remove_entries(["B", "D", "missing"]), 0);
        assert_eq!(wheel.entries(), &once[..]);
        assert_eq!(wheel.titles(), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_clears_last_winner() {
        let mut wheel = wheel_with(&["A", "B", "C"]);
        let b = wheel.find("B").unwrap().id;
        assert!(wheel.set_last_winner(b));
        assert_eq!(wheel.last_winner().unwrap().title, "B");

        wheel.remove_entries(["A"]);
        assert_eq!(wheel.last_winner_id(), Some(b));

        wheel.remove_entries(["b"]);
        assert_eq!(wheel.last_winner_id(), None);
        assert!(wheel.last_winner().is_none());
        assert!(!wheel.set_last_winner(b));
    }

    #[test]
    fn test_pick_winner_needs_two() {
        let mut rng = StdRng::seed_from_u64(7);
        let wheel = WheelState::new();
        for _ in 0..10 {
            assert_eq!(
                wheel.pick_winner_with(&mut rng),
                Err(WheelError::InsufficientEntries { count: 0 })
            );
        }
        let wheel = wheel_with(&["Solo"]);
        assert_eq!(
            wheel.pick_winner(),
            Err(WheelError::InsufficientEntries { count: 1 })
        );
    }

    #[test]
    fn test_pick_winner_uniform() {
        let wheel = wheel_with(&["A", "B", "C", "D"]);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let trials = 10_000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            counts[wheel.pick_winner_with(&mut rng).unwrap()] += 1;
        }

        let expected = trials as f64 / 4.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        // Critical value for 3 degrees of freedom at p = 0.001
        assert!(chi_square < 16.27, "chi2={} counts={:?}", chi_square, counts);
    }

    #[test]
    fn test_pick_winner_unseeded_in_range() {
        let wheel = wheel_with(&["A", "B", "C"]);
        for _ in 0..100 {
            assert!(wheel.pick_winner().unwrap() < 3);
        }
    }
}
